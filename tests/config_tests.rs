// tests/config_tests.rs

use siren::{ConverterConfig, ErrorCategory, ReflectingConverter, SirenError};

#[cfg(test)]
mod config_tests {
    use super::*;

    #[test]
    fn test_yaml_overrides_defaults() {
        let config = ConverterConfig::from_yaml_str(
            "type_property: kind\nskip_null_properties: true\nbase_uri: https://api.example.com\n",
        )
        .unwrap();
        assert!(config.include_type_info);
        assert_eq!(config.type_property, "kind");
        assert!(config.skip_null_properties);
        assert_eq!(config.base_uri.as_deref(), Some("https://api.example.com"));
    }

    #[test]
    fn test_empty_document_is_default() {
        let config = ConverterConfig::from_json_str("{}").unwrap();
        assert_eq!(config, ConverterConfig::default());
        assert_eq!(config.type_property, "resourceType");
    }

    #[test]
    fn test_blank_type_property_is_rejected() {
        let err = ConverterConfig::from_yaml_str("type_property: ''").unwrap_err();
        assert!(matches!(err, SirenError::IllegalArgument { ref name, .. } if name == "type_property"));

        let config = ConverterConfig {
            include_type_info: false,
            type_property: String::new(),
            ..ConverterConfig::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_malformed_yaml_is_a_config_error() {
        let err = ConverterConfig::from_yaml_str("include_type_info: [").unwrap_err();
        assert_eq!(err.category(), ErrorCategory::Config);
    }

    #[test]
    fn test_malformed_json_is_a_config_error() {
        let err = ConverterConfig::from_json_str("{\"include_type_info\": 1}").unwrap_err();
        assert!(matches!(err, SirenError::ConfigJson(_)));
        assert_eq!(err.category(), ErrorCategory::Config);
    }

    #[test]
    fn test_converter_refuses_invalid_config() {
        let config = ConverterConfig {
            type_property: " ".to_string(),
            ..ConverterConfig::default()
        };
        assert!(ReflectingConverter::new().with_config(config).is_err());
    }

    #[test]
    fn test_absolute_only_prefixes_rooted_paths() {
        let config = ConverterConfig {
            base_uri: Some("https://api.example.com/".to_string()),
            ..ConverterConfig::default()
        };
        assert_eq!(config.absolute("/a".to_string()), "https://api.example.com/a");
        assert_eq!(config.absolute("http://x/a".to_string()), "http://x/a");
    }
}
