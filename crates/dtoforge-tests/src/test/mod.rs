mod mapper;
mod model;
mod validate;

use crate::t::{Address, Customer};

/// A customer that passes every configured rule.
pub fn valid_customer() -> Customer {
    Customer {
        id: 1,
        name: "Ada".to_string(),
        email: "ada@example.com".to_string(),
        nickname: "ace".to_string(),
        score: 7,
        address: Address {
            street: "1 Main St".to_string(),
            zip: "12345".to_string(),
        },
        password: "secret".to_string(),
    }
}
