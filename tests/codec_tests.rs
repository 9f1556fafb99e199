// tests/codec_tests.rs

use serde_json::json;
use siren::builder::{ActionBuilder, Builder, EntityBuilder, FieldBuilder, LinkBuilder};
use siren::codec;
use siren::component::{FieldType, Method};
use siren::{Entity, SirenError};

fn order() -> Entity {
    let link = LinkBuilder::new()
        .set_rel(["self"])
        .unwrap()
        .set_href("/orders/123")
        .unwrap()
        .build()
        .unwrap();
    EntityBuilder::new()
        .set_rel(["order"])
        .add_property("total", 30.0)
        .unwrap()
        .add_link(link)
        .build()
        .unwrap()
}

#[cfg(test)]
mod codec_tests {
    use super::*;

    #[test]
    fn test_order_round_trips_unchanged() {
        let entity = order();
        let text = codec::encode(&entity).unwrap();
        let decoded = codec::decode(&text).unwrap();
        assert_eq!(decoded, entity);
        assert_eq!(codec::encode(&decoded).unwrap(), text);
    }

    #[test]
    fn test_wire_field_names() {
        let action = ActionBuilder::new()
            .set_component_class(["form"])
            .set_name("add-item")
            .unwrap()
            .set_href("/orders/123/items")
            .unwrap()
            .set_method(Method::Post)
            .set_type("application/json")
            .add_field(
                FieldBuilder::new()
                    .set_name("quantity")
                    .unwrap()
                    .set_type(FieldType::Number)
                    .set_value(1)
                    .set_max_length(3)
                    .build()
                    .unwrap(),
            )
            .build()
            .unwrap();
        let entity = EntityBuilder::new()
            .set_component_class(["order"])
            .add_action(action)
            .build()
            .unwrap();

        let encoded = codec::to_value(&entity).unwrap();
        assert_eq!(
            encoded,
            json!({
                "class": ["order"],
                "actions": [{
                    "class": ["form"],
                    "name": "add-item",
                    "method": "POST",
                    "href": "/orders/123/items",
                    "type": "application/json",
                    "fields": [{ "name": "quantity", "type": "number", "value": 1, "maxLength": 3 }]
                }]
            })
        );
    }

    #[test]
    fn test_property_order_survives_decoding() {
        let text = r#"{"properties":{"z":1,"a":2,"m":3}}"#;
        let entity = codec::decode(text).unwrap();
        let keys: Vec<&str> = entity.properties().keys().map(String::as_str).collect();
        assert_eq!(keys, ["z", "a", "m"]);
        assert_eq!(codec::encode(&entity).unwrap(), text);
    }

    #[test]
    fn test_display_is_the_json_encoding() {
        let entity = order();
        assert_eq!(entity.to_string(), codec::encode(&entity).unwrap());
    }

    #[test]
    fn test_embedded_link_decodes_as_embedded() {
        let entity = codec::decode(r#"{"entities":[{"rel":["item"],"href":"/items/1"}]}"#).unwrap();
        assert!(entity.entities()[0].is_embedded_link());
    }

    #[test]
    fn test_malformed_text_is_a_codec_error() {
        let err = codec::decode("{").unwrap_err();
        assert!(matches!(err, SirenError::Codec(_)));
    }
}
