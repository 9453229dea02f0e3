//! Conversion of `validator` reports into plain field/message maps.

use std::collections::BTreeMap;
use validator::ValidationErrors;

/// Flattens a [`ValidationErrors`] report into `field -> [messages]`.
///
/// Every violation is kept, in the order the validator reported it for that
/// field. Violations without an explicit message fall back to
/// `"<field> is invalid (<code>)"`.
pub fn field_messages(errors: &ValidationErrors) -> BTreeMap<String, Vec<String>> {
    let mut map: BTreeMap<String, Vec<String>> = BTreeMap::new();

    for (field, field_errors) in errors.field_errors() {
        let field = field.to_string();
        let messages = field_errors.iter().map(|err| match &err.message {
            Some(message) => message.to_string(),
            None => format!("{} is invalid ({})", field, err.code),
        });

        map.entry(field.clone()).or_default().extend(messages);
    }

    map
}
