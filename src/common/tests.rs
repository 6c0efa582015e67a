// SPDX-FileCopyrightText: 2024 Softbear, Inc.
// SPDX-License-Identifier: LGPL-3.0-or-later

#[cfg(test)]
mod common_tests {
    use crate::common::{Error, Route53Settings};
    use hyper::StatusCode;

    #[cfg(feature = "toml")]
    #[test]
    fn config_tests() {
        use crate::common::CubConfig;

        println!("Testing [route53] table");
        let cub_config = CubConfig::builder()
            .toml_str(
                r#"
            [route53]
            endpoint = "http://localhost:8053"
            max_items = 2
            [route53.headers]
            x-proxy-token = "abc"
            "#,
            )
            .debug(true)
            .build()
            .expect("config_tests.toml");
        assert!(cub_config.debug());
        let settings = cub_config.route53().expect("route53 table");
        assert_eq!(settings.endpoint, "http://localhost:8053");
        assert_eq!(settings.api_version, Route53Settings::API_VERSION);
        assert_eq!(settings.max_items, Some(2));
        assert_eq!(settings.headers.get("x-proxy-token").map(String::as_str), Some("abc"));

        println!("Testing defaults when table is absent");
        let cub_config = CubConfig::builder()
            .toml_str("[other]\nkey = 1\n")
            .build()
            .expect("empty.toml");
        assert_eq!(cub_config.route53().expect("defaults"), Route53Settings::default());

        println!("Testing bad toml");
        let cub_config = CubConfig::builder()
            .toml_str("[route53\n")
            .build()
            .expect("unparsed text is accepted by the builder");
        assert!(matches!(cub_config.route53(), Err(Error::String(_))));

        println!("Testing missing file");
        let result = CubConfig::builder()
            .toml_file("no-such-file-cub-route53.toml")
            .build();
        assert!(matches!(result, Err(Error::String(_))));
    }

    #[test]
    fn error_tests() {
        println!("Testing error display");
        let e = Error::Transport(StatusCode::NOT_FOUND, "hostedzone/Z1: gone".to_string());
        assert!(e.is_transport());
        assert_eq!(e.status(), Some(StatusCode::NOT_FOUND));
        assert_eq!(e.to_string(), "404 Not Found: hostedzone/Z1: gone");

        let e = Error::UnsupportedRecordType("DNAME".to_string());
        assert!(!e.is_transport());
        assert_eq!(e.status(), None);
        assert_eq!(e.to_string(), "unsupported record type DNAME");
    }
}
