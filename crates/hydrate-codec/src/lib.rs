//! Tagged-value decoder and encoder for hydrate.
//!
//! A tagged mapping is a mapping that names its type under a tag key and
//! carries the constructor's input under a data key:
//!
//! ```json
//! { "json_class": "Car", "data": { "wheels": 4, "year": 2023 } }
//! ```
//!
//! The [`Decoder`] replaces each tagged mapping with the domain value its
//! registered constructor builds, innermost first. The [`Encoder`] writes
//! domain values back out in the same shape. Keys, unknown-tag handling, and
//! the nesting limit come from [`CodecConfig`]; nothing is global.
//!
//! # Quick Start
//!
//! ```rust
//! use hydrate_codec::{Codec, CodecConfig};
//! use hydrate_node::{Describe, Mapping, Node, PayloadError};
//! use hydrate_registry::{Hydrate, TypeRegistry};
//!
//! #[derive(Debug, PartialEq)]
//! struct Bike { country: String }
//!
//! impl Describe for Bike {
//!     fn tag(&self) -> &str { "Bike" }
//!     fn payload(&self) -> Result<Node, PayloadError> {
//!         Ok(Mapping::from_iter([("country", Node::from(self.country.as_str()))]).into())
//!     }
//! }
//!
//! impl Hydrate for Bike {
//!     fn hydrate(payload: Node) -> Result<Self, PayloadError> {
//!         let map = payload.expect_mapping()?;
//!         Ok(Bike { country: map.require_str("country")?.to_owned() })
//!     }
//! }
//!
//! let mut registry = TypeRegistry::new();
//! registry.register_type::<Bike>("Bike");
//!
//! let codec = Codec::new(&registry, CodecConfig::strict()).unwrap();
//! let node = codec.decode_str(r#"{"json_class":"Bike","data":{"country":"Japan"}}"#).unwrap();
//! assert_eq!(node.object_ref::<Bike>().unwrap().country, "Japan");
//!
//! let text = codec.to_json_string(node).unwrap();
//! assert_eq!(text, r#"{"json_class":"Bike","data":{"country":"Japan"}}"#);
//! ```

pub mod codec;
pub mod config;
pub mod decode;
pub mod encode;
pub mod error;
mod walk;

#[cfg(test)]
pub(crate) mod fixtures;

pub use codec::{decode, encode, Codec};
pub use config::{
    CodecConfig, UnknownTagPolicy, DEFAULT_DATA_KEY, DEFAULT_MAX_DEPTH, DEFAULT_TAG_KEY,
};
pub use decode::Decoder;
pub use encode::Encoder;
pub use error::{CodecError, CodecResult};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::*;
    use hydrate_node::{DomainValue, Mapping, Node};
    use hydrate_registry::TypeRegistry;
    use proptest::prelude::*;

    // -----------------------------------------------------------------------
    // Round trips through nested tagged values
    // -----------------------------------------------------------------------
    #[test]
    fn fleet_roundtrip_three_levels_deep() {
        let registry = vehicle_registry();
        let codec = Codec::with_defaults(&registry);
        let fleet = DomainValue::new(sample_fleet());

        let encoded = codec.encode_value(&fleet).unwrap();
        assert_eq!(encoded.depth(), 7);
        let decoded = codec.decode(encoded).unwrap();
        assert_eq!(decoded, Node::Object(fleet));
        let garages = &decoded.object_ref::<Fleet>().unwrap().garages;
        let north = garages[0].downcast_ref::<Garage>().unwrap();
        assert!(north.vehicles[1].is::<Bike>());
    }

    #[test]
    fn fleet_roundtrip_through_text() {
        let registry = vehicle_registry();
        let codec = Codec::with_defaults(&registry);
        let fleet = DomainValue::new(sample_fleet());

        let text = codec.to_json_string(fleet.clone().into()).unwrap();
        assert!(text.starts_with(r#"{"json_class":"Fleet","data":[{"json_class":"Garage""#));
        assert_eq!(codec.decode_str(&text).unwrap(), Node::Object(fleet));
    }

    #[test]
    fn generic_roundtrip_modulo_wrapper_order() {
        let registry = vehicle_registry();
        let codec = Codec::with_defaults(&registry);
        // Data key before tag key: re-encoding writes the tag first.
        let input = doc(r#"{"list":[{"data":{"wheels":2,"country":"PE"},"json_class":"Bike"}]}"#);
        let output = codec.encode(codec.decode(input.clone()).unwrap()).unwrap();
        assert_eq!(output, input);
        let wrapper = &output.as_mapping().unwrap().require_sequence("list").unwrap()[0];
        let keys: Vec<&str> = wrapper.as_mapping().unwrap().keys().collect();
        assert_eq!(keys, vec!["json_class", "data"]);
    }

    #[test]
    fn lenient_roundtrip_keeps_unknown_tags() {
        let registry = vehicle_registry();
        let codec = Codec::new(&registry, CodecConfig::lenient()).unwrap();
        let input = doc(
            r#"[{"json_class":"Ghost","data":{"car":{"json_class":"Car","data":{"wheels":4,"year":9}}}}]"#,
        );
        let output = codec.encode(codec.decode(input.clone()).unwrap()).unwrap();
        assert_eq!(output, input);
    }

    // -----------------------------------------------------------------------
    // Moving between tag conventions
    // -----------------------------------------------------------------------
    #[test]
    fn configured_key_decodes_like_default_key() {
        let registry = vehicle_registry();
        let default = Codec::with_defaults(&registry);
        let custom =
            Codec::new(&registry, CodecConfig::strict().with_tag_key("resource_type")).unwrap();

        let a = default
            .decode_str(r#"{"json_class":"Car","data":{"wheels":4,"year":2023}}"#)
            .unwrap();
        let b = custom
            .decode_str(r#"{"resource_type":"Car","data":{"wheels":4,"year":2023}}"#)
            .unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn opaque_registry_rekeys_documents() {
        let opaque = TypeRegistry::opaque();
        let from = Codec::with_defaults(&opaque);
        let to = Codec::new(
            &opaque,
            CodecConfig::default()
                .with_tag_key("resource_type")
                .with_data_key("attributes"),
        )
        .unwrap();

        let input = r#"{"json_class":"Garage","data":{"name":"w","vehicles":[{"json_class":"Car","data":{"wheels":4,"year":1}}]}}"#;
        let hydrated = from.decode_str(input).unwrap();
        let output = to.to_json_string(hydrated).unwrap();
        assert_eq!(
            output,
            r#"{"resource_type":"Garage","attributes":{"name":"w","vehicles":[{"resource_type":"Car","attributes":{"wheels":4,"year":1}}]}}"#
        );
    }

    // -----------------------------------------------------------------------
    // Concurrent use of one registry
    // -----------------------------------------------------------------------
    #[test]
    fn shared_registry_across_threads() {
        let registry = vehicle_registry();
        let text = r#"{"json_class":"Car","data":{"wheels":4,"year":2001}}"#;
        std::thread::scope(|scope| {
            let handles: Vec<_> = (0..8)
                .map(|_| {
                    scope.spawn(|| {
                        let codec = Codec::with_defaults(&registry);
                        let node = codec.decode_str(text).unwrap();
                        node.object_ref::<Car>().cloned()
                    })
                })
                .collect();
            for handle in handles {
                assert_eq!(handle.join().unwrap(), Some(Car::new(4, 2001)));
            }
        });
    }

    // -----------------------------------------------------------------------
    // Properties
    // -----------------------------------------------------------------------

    /// Trees whose keys never spell a tag key.
    fn arb_untagged() -> impl Strategy<Value = Node> {
        let leaf = prop_oneof![
            Just(Node::Null),
            any::<bool>().prop_map(Node::from),
            any::<i64>().prop_map(Node::from),
            "[a-z ]{0,8}".prop_map(Node::from),
        ];
        leaf.prop_recursive(5, 48, 6, |inner| {
            prop_oneof![
                prop::collection::vec(inner.clone(), 0..6).prop_map(Node::Sequence),
                prop::collection::vec(("[a-i]{1,6}", inner), 0..6)
                    .prop_map(|entries| Node::Mapping(entries.into_iter().collect::<Mapping>())),
            ]
        })
    }

    fn arb_vehicle() -> impl Strategy<Value = DomainValue> {
        prop_oneof![
            (0u64..20, -3000i64..3000).prop_map(|(w, y)| DomainValue::new(Car::new(w, y))),
            (0u64..20, "[A-Za-z]{0,12}").prop_map(|(w, c)| DomainValue::new(Bike::new(w, &c))),
            Just(DomainValue::new(Unicycle)),
        ]
    }

    fn arb_fleet() -> impl Strategy<Value = DomainValue> {
        let garage = ("[a-z]{1,8}", prop::collection::vec(arb_vehicle(), 0..5))
            .prop_map(|(name, vehicles)| DomainValue::new(Garage { name, vehicles }));
        prop::collection::vec(garage, 0..4).prop_map(|garages| DomainValue::new(Fleet { garages }))
    }

    proptest! {
        #[test]
        fn decoding_untagged_input_is_identity(node in arb_untagged()) {
            let registry = vehicle_registry();
            let codec = Codec::with_defaults(&registry);
            prop_assert_eq!(codec.decode(node.clone()).unwrap(), node);
        }

        #[test]
        fn encoding_untagged_input_is_identity(node in arb_untagged()) {
            let registry = vehicle_registry();
            let codec = Codec::with_defaults(&registry);
            prop_assert_eq!(codec.encode(node.clone()).unwrap(), node);
        }

        #[test]
        fn decode_inverts_encode(fleet in arb_fleet()) {
            let registry = vehicle_registry();
            let codec = Codec::with_defaults(&registry);
            let encoded = codec.encode_value(&fleet).unwrap();
            prop_assert_eq!(codec.decode(encoded).unwrap(), Node::Object(fleet));
        }

        #[test]
        fn text_roundtrip_is_stable(fleet in arb_fleet()) {
            let registry = vehicle_registry();
            let codec = Codec::with_defaults(&registry);
            let once = codec.to_json_string(fleet.into()).unwrap();
            let twice = codec.to_json_string(codec.decode_str(&once).unwrap()).unwrap();
            prop_assert_eq!(once, twice);
        }
    }
}
