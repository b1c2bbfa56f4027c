// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use serde::{Deserialize, Serialize};

macro_rules! record_id {
    ($name:ident, $prefix:literal) => {
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(i64);

        impl $name {
            pub const PREFIX: &'static str = $prefix;

            pub const fn new(value: i64) -> Self {
                Self(value)
            }

            pub const fn get(self) -> i64 {
                self.0
            }

            /// Row key used for table selection, e.g. `lead-12`.
            pub fn row_key(self) -> String {
                format!("{}-{}", Self::PREFIX, self.0)
            }
        }

        impl From<i64> for $name {
            fn from(value: i64) -> Self {
                Self(value)
            }
        }
    };
}

record_id!(LeadId, "lead");
record_id!(ActivityId, "activity");
record_id!(OrderId, "order");
record_id!(QuoteId, "quote");

#[cfg(test)]
mod tests {
    use super::{LeadId, OrderId};

    #[test]
    fn row_keys_carry_the_record_prefix() {
        assert_eq!(LeadId::new(12).row_key(), "lead-12");
        assert_eq!(OrderId::from(3).row_key(), "order-3");
        assert_eq!(LeadId::new(7).get(), 7);
    }
}
