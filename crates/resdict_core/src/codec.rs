//! JSON codec for resource definitions.
//!
//! # Invariants
//! - Decoding ignores unknown keys; they are absent from re-encoded text.
//! - Encoding an already-canonical definition yields identical text.

use crate::model::definition::ResourceDefinition;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type CodecResult<T> = Result<T, CodecError>;

/// Failure to convert between definition text and `ResourceDefinition`.
#[derive(Debug)]
pub enum CodecError {
    Decode(serde_json::Error),
    Encode(serde_json::Error),
}

impl Display for CodecError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Decode(err) => write!(f, "invalid resource definition: {err}"),
            Self::Encode(err) => write!(f, "failed to encode resource definition: {err}"),
        }
    }
}

impl Error for CodecError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Decode(err) | Self::Encode(err) => Some(err),
        }
    }
}

/// Parses definition text into its structured form.
pub fn decode_definition(text: &str) -> CodecResult<ResourceDefinition> {
    serde_json::from_str(text).map_err(CodecError::Decode)
}

/// Serializes a definition, pretty-printed when `pretty` is set.
pub fn encode_definition(definition: &ResourceDefinition, pretty: bool) -> CodecResult<String> {
    let encoded = if pretty {
        serde_json::to_string_pretty(definition)
    } else {
        serde_json::to_string(definition)
    };
    encoded.map_err(CodecError::Encode)
}

#[cfg(test)]
mod tests {
    use super::{decode_definition, encode_definition, CodecError};

    const SAMPLE: &str = r#"{
        "tags": "vnf, naming",
        "name": "vnf-name",
        "resource-path": "vnf/vnf-name",
        "resource-type": "ONAP",
        "property": {
            "type": "list",
            "description": "vnf names",
            "entry_schema": { "type": "string" }
        },
        "sources": {
            "input": { "type": "source-input" },
            "default": { "type": "source-default", "properties": { "key": "x" } }
        }
    }"#;

    #[test]
    fn decode_reads_kebab_case_fields() {
        let definition = decode_definition(SAMPLE).unwrap();
        assert_eq!(definition.resource_type.as_deref(), Some("ONAP"));
        assert_eq!(definition.resource_path.as_deref(), Some("vnf/vnf-name"));
        let property = definition.property.unwrap();
        assert_eq!(property.data_type.as_deref(), Some("list"));
        assert_eq!(property.entry_schema_type(), Some("string"));
        assert_eq!(definition.sources.unwrap().len(), 2);
    }

    #[test]
    fn decode_accepts_camel_case_aliases() {
        let definition = decode_definition(
            r#"{"resourceType":"ONAP","resourcePath":"a/b","updatedBy":"u",
                "property":{"type":"list","entrySchema":{"type":"integer"}}}"#,
        )
        .unwrap();
        assert_eq!(definition.resource_type.as_deref(), Some("ONAP"));
        assert_eq!(definition.resource_path.as_deref(), Some("a/b"));
        assert_eq!(definition.updated_by.as_deref(), Some("u"));
        assert_eq!(
            definition.property.unwrap().entry_schema_type(),
            Some("integer")
        );
    }

    #[test]
    fn encode_is_canonical_and_idempotent() {
        let first = encode_definition(&decode_definition(SAMPLE).unwrap(), true).unwrap();
        let second = encode_definition(&decode_definition(&first).unwrap(), true).unwrap();
        assert_eq!(first, second);
        assert!(first.contains("\"resource-type\": \"ONAP\""));
        assert!(first.contains('\n'));
    }

    #[test]
    fn encode_omits_unset_fields_and_unknown_keys() {
        let definition =
            decode_definition(r#"{"resource-type":"ONAP","extra":1,"property":{"type":"string"}}"#)
                .unwrap();
        let encoded = encode_definition(&definition, false).unwrap();
        assert_eq!(
            encoded,
            r#"{"property":{"type":"string"},"resource-type":"ONAP"}"#
        );
    }

    #[test]
    fn decode_rejects_malformed_and_mistyped_input() {
        assert!(matches!(
            decode_definition("{not json"),
            Err(CodecError::Decode(_))
        ));
        assert!(matches!(
            decode_definition("[1, 2]"),
            Err(CodecError::Decode(_))
        ));
        assert!(matches!(
            decode_definition(r#"{"property": "string"}"#),
            Err(CodecError::Decode(_))
        ));
    }
}
