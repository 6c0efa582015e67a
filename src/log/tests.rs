// SPDX-FileCopyrightText: 2024 Softbear, Inc.
// SPDX-License-Identifier: LGPL-3.0-or-later

#[cfg(test)]
mod logger_tests {
    use crate::common::Error;
    use crate::log::StringLogger;

    #[test]
    fn logger_tests() {
        println!("Testing logger");
        let log1 = StringLogger::default();

        let bar = 123;
        log1.trace(format!("foo {bar}"));
        log1.trace(String::new());
        log1.trace(format!("bar {bar}"));
        assert_eq!(log1.to_string(), "foo 123\nbar 123");
        assert!(!log1.contains_warnings());

        println!("Testing that clones share lines");
        let log1b = log1.clone();
        log1b.trace("shared".to_string());
        assert_eq!(log1.lines().len(), 3);

        println!("Testing warnings");
        let log2 = StringLogger::new(true);
        log2.warn("this is a warning".to_string());
        assert!(log2.contains_warnings());
        assert!(!log1.contains_warnings());

        println!("Testing call");
        let log3 = StringLogger::default();
        let ok: Result<u32, Error> = Ok(1);
        assert_eq!(log3.call("GET a".to_string(), ok).ok(), Some(1));
        assert!(!log3.contains_warnings());
        let err: Result<u32, Error> = Err(Error::String("this is an error".to_string()));
        assert!(log3.call("GET b".to_string(), err).is_err());
        assert!(log3.contains_warnings());
        assert_eq!(log3.lines()[0], "GET a succeeded");
        assert!(log3.lines()[1].starts_with("GET b failed"));
    }
}
