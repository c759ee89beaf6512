    use super::*;

    #[test]
    fn parses_wire_shape_with_defaults() {
        let item: CatalogItem = serde_json::from_value(serde_json::json!({
            "externalId": "x1",
            "name": "Orders",
            "throttlingPolicy": "Gold",
            "keyInfoList": [{"keyType": "PRODUCTION"}],
            "subscribedApis": [{
                "apiName": "Pets",
                "apiVersion": "1.0.0",
                "apiContext": "/pets"
            }]
        }))
        .expect("parse item");

        assert_eq!(item.external_id, "x1");
        assert!(!item.already_imported);
        assert!(item.attributes.is_empty());
        assert_eq!(item.policy_label(), "Gold");
        assert_eq!(item.owner_label(), "-");
        assert_eq!(item.tier_label(), "Unlimited");
        assert_eq!(item.key_info_list[0].state_label(), "ACTIVE");
        assert_eq!(item.subscribed_apis[0].status_label(), "ACTIVE");
    }

    #[test]
    fn policy_label_falls_back_to_tier() {
        let mut item = CatalogItem::new("x1", "Orders");
        item.tier = Some("Bronze".to_string());
        assert_eq!(item.policy_label(), "Bronze");
        assert_eq!(item.tier_label(), "Bronze");
    }

    #[test]
    fn blank_artifact_is_not_usable() {
        let mut item = CatalogItem::new("x1", "Orders");
        item.reference_artifact = Some("   ".to_string());
        assert_eq!(item.artifact(), None);
        item.reference_artifact = Some("opaque".to_string());
        assert_eq!(item.artifact(), Some("opaque"));
    }

    #[test]
    fn timestamp_accepts_millis_and_rfc3339() {
        let millis: Timestamp = serde_json::from_value(serde_json::json!(0)).expect("millis");
        assert_eq!(millis.display(), "1970-01-01 00:00:00Z");

        let text: Timestamp =
            serde_json::from_value(serde_json::json!("2024-05-01T10:20:30+02:00")).expect("text");
        assert_eq!(text.display(), "2024-05-01 08:20:30Z");

        let numeric_text = Timestamp::Text("1000".to_string());
        assert_eq!(numeric_text.display(), "1970-01-01 00:00:01Z");

        let junk = Timestamp::Text("yesterday".to_string());
        assert_eq!(junk.display(), "yesterday");
    }
