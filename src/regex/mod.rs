// Precompiled patterns shared by the parsers

#[macro_use]
mod cache;

#[cfg(test)]
mod check {
    #[test]
    fn compiled_once() {
        let first = regex!(r"^[a-z]+$");
        let second = regex!(r"^[a-z]+$");

        assert!(first.is_match("pml"));
        assert!(!second.is_match("PML1"));
    }
}
