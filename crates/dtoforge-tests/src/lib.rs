//! Fixture crate: compiles the generated projection output and exercises it
//! at runtime. Source fixtures live in `t`; the generated DTOs and mappers
//! are mounted at `t::dto` from `OUT_DIR`.

pub mod t {
    ///
    /// Customer
    /// plain source type; `password` is excluded from projection
    ///

    #[derive(Clone, Debug, Default)]
    pub struct Customer {
        pub id: i32,
        pub name: String,
        pub email: String,
        pub nickname: String,
        pub score: i64,
        pub address: Address,
        pub password: String,
    }

    ///
    /// Address
    /// nested source type projected with value semantics
    ///

    #[derive(Clone, Debug, Default, PartialEq)]
    pub struct Address {
        pub street: String,
        pub zip: String,
    }

    ///
    /// Empty
    ///

    #[derive(Clone, Debug, Default)]
    pub struct Empty {}

    /// External validator referenced from the score configuration.
    pub fn non_negative(score: &i64) -> Option<String> {
        (*score < 0).then(|| "score must not be negative".to_string())
    }

    pub mod dto {
        include!(concat!(env!("OUT_DIR"), "/t_dto.rs"));
    }
}

#[cfg(test)]
mod test;
