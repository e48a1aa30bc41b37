//! Customer form layout

use crate::state::{ArraySchema, FieldSchema, FieldValue, GroupSchema};
use crate::validation::{GroupValidator, Validator};

/// Paths of the customer form's nodes
pub mod paths {
    pub const FIRST_NAME: &str = "firstName";
    pub const LAST_NAME: &str = "lastName";
    pub const EMAIL_GROUP: &str = "emailGroup";
    pub const EMAIL: &str = "emailGroup.email";
    pub const CONFIRM_EMAIL: &str = "emailGroup.confirmEmail";
    pub const PHONE: &str = "phone";
    pub const NOTIFICATION: &str = "notification";
    pub const RATING: &str = "rating";
    pub const SEND_CATALOG: &str = "sendCatalog";
    pub const ADDRESSES: &str = "addressesGroup";
}

/// Shape of one postal address
pub fn address_schema() -> GroupSchema {
    GroupSchema::new()
        .field("addressType", FieldSchema::new("home"))
        .field("street1", FieldSchema::new(FieldValue::Null))
        .field("street2", FieldSchema::new(FieldValue::Null))
        .field("city", FieldSchema::new(FieldValue::Null))
        .field("state", FieldSchema::new(FieldValue::Null))
        .field("zip", FieldSchema::new(FieldValue::Null))
}

pub fn customer_schema() -> GroupSchema {
    GroupSchema::new()
        .field(
            "firstName",
            FieldSchema::new(FieldValue::Null)
                .validators([Validator::Required, Validator::MinLength(3)]),
        )
        .field(
            "lastName",
            FieldSchema::new(FieldValue::Null)
                .validators([Validator::Required, Validator::MaxLength(50)]),
        )
        .group(
            "emailGroup",
            GroupSchema::new()
                .field(
                    "email",
                    FieldSchema::new(FieldValue::Null)
                        .validators([Validator::Required, Validator::Email]),
                )
                .field(
                    "confirmEmail",
                    FieldSchema::new(FieldValue::Null).validator(Validator::Required),
                )
                .validator(GroupValidator::matching("email", "confirmEmail")),
        )
        .field("phone", FieldSchema::new(FieldValue::Null))
        .field("notification", FieldSchema::new("email"))
        .field(
            "rating",
            FieldSchema::new(FieldValue::Null).validator(Validator::range(1.0, 5.0)),
        )
        .field("sendCatalog", FieldSchema::new(true))
        .array("addressesGroup", ArraySchema::new(address_schema(), 1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::FormState;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_schema_builds() {
        let form = FormState::new(&customer_schema()).unwrap();
        assert_eq!(
            form.value(),
            json!({
                "firstName": null,
                "lastName": null,
                "emailGroup": {"email": null, "confirmEmail": null},
                "phone": null,
                "notification": "email",
                "rating": null,
                "sendCatalog": true,
                "addressesGroup": [{
                    "addressType": "home",
                    "street1": null,
                    "street2": null,
                    "city": null,
                    "state": null,
                    "zip": null
                }]
            })
        );
    }

    #[test]
    fn test_paths_resolve() {
        let form = FormState::new(&customer_schema()).unwrap();
        for path in [
            paths::FIRST_NAME,
            paths::LAST_NAME,
            paths::EMAIL,
            paths::CONFIRM_EMAIL,
            paths::PHONE,
            paths::NOTIFICATION,
            paths::RATING,
            paths::SEND_CATALOG,
        ] {
            assert!(form.field(path).is_ok(), "{path} should be a field");
        }
        assert!(form.node(paths::EMAIL_GROUP).is_ok());
        assert_eq!(form.len(paths::ADDRESSES).unwrap(), 1);
    }

    #[test]
    fn test_rating_range() {
        let mut form = FormState::new(&customer_schema()).unwrap();
        for ok in [1.0, 5.0] {
            form.set_value(paths::RATING, ok).unwrap();
            assert!(form.is_valid(paths::RATING).unwrap());
        }
        for bad in [FieldValue::from(0), FieldValue::from(6), FieldValue::from("abc")] {
            form.set_value(paths::RATING, bad).unwrap();
            assert!(!form.is_valid(paths::RATING).unwrap());
        }
        form.set_value(paths::RATING, FieldValue::Null).unwrap();
        assert!(form.is_valid(paths::RATING).unwrap());
    }

    #[test]
    fn test_fresh_form_is_invalid_and_pristine() {
        let form = FormState::new(&customer_schema()).unwrap();
        assert!(!form.is_valid("").unwrap());
        assert!(form.is_pristine("").unwrap());
        // no match error while both sides are pristine
        assert!(form.errors(paths::EMAIL_GROUP).unwrap().is_none());
    }
}
