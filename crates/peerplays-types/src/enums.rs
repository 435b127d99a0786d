//! Chain enumerations.
//!
//! Enumerations are written as zigzag `signed_int` varints and appear in JSON
//! as snake_case names. Integer input is accepted as well.

use std::fmt;
use std::str::FromStr;

use peerplays_primitives::util::{SignedVarInt, WireReader, WireWriter};
use serde_json::Value;

use crate::codec::{Decode, Encode};
use crate::json::JsonField;
use crate::TypesError;

macro_rules! chain_enum {
    (
        $(#[$meta:meta])*
        $name:ident as $label:literal {
            $($variant:ident = $value:literal => $text:literal),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $($variant,)*
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant,)*];

            pub fn value(self) -> i32 {
                match self {
                    $($name::$variant => $value,)*
                }
            }

            pub fn from_value(value: i32) -> Result<Self, TypesError> {
                match value {
                    $($value => Ok($name::$variant),)*
                    other => Err(TypesError::UnknownEnumValue {
                        name: $label,
                        value: other.to_string(),
                    }),
                }
            }

            pub fn as_str(self) -> &'static str {
                match self {
                    $($name::$variant => $text,)*
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = TypesError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($text => Ok($name::$variant),)*
                    other => Err(TypesError::UnknownEnumValue {
                        name: $label,
                        value: other.to_string(),
                    }),
                }
            }
        }

        impl Encode for $name {
            fn encode(&self, writer: &mut WireWriter) {
                writer.write_signed_varint(SignedVarInt(self.value()));
            }
        }

        impl Decode for $name {
            fn decode(reader: &mut WireReader<'_>) -> Result<Self, TypesError> {
                $name::from_value(reader.read_signed_varint()?.0)
            }
        }

        impl JsonField for $name {
            fn to_json(&self) -> Value {
                Value::String(self.as_str().to_string())
            }

            fn from_json(value: &Value) -> Result<Self, TypesError> {
                match value {
                    Value::String(s) => s.parse(),
                    Value::Number(n) => {
                        let raw = n.as_i64().and_then(|v| i32::try_from(v).ok()).ok_or_else(|| {
                            TypesError::UnknownEnumValue { name: $label, value: n.to_string() }
                        })?;
                        $name::from_value(raw)
                    }
                    other => Err(TypesError::InvalidField(format!(
                        "expected {} name, got {}",
                        $label, other
                    ))),
                }
            }
        }
    };
}

chain_enum! {
    /// Lifecycle of a sporting event.
    EventStatus as "event status" {
        Upcoming = 0 => "upcoming",
        InProgress = 1 => "in_progress",
        Frozen = 2 => "frozen",
        Finished = 3 => "finished",
        Canceled = 4 => "canceled",
        Settled = 5 => "settled",
    }
}

chain_enum! {
    /// Side of a bet.
    BetType as "bet type" {
        Back = 0 => "back",
        Lay = 1 => "lay",
    }
}

chain_enum! {
    /// Outcome assigned to a betting market when its group is resolved.
    BettingMarketResolution as "betting market resolution" {
        Win = 0 => "win",
        NotWin = 1 => "not_win",
        Cancel = 2 => "cancel",
    }
}

chain_enum! {
    BettingMarketGroupStatus as "betting market group status" {
        Upcoming = 0 => "upcoming",
        InPlay = 1 => "in_play",
        Closed = 2 => "closed",
        Graded = 3 => "graded",
        ReGrading = 4 => "re_grading",
        Settled = 5 => "settled",
        Frozen = 6 => "frozen",
        Canceled = 7 => "canceled",
    }
}

chain_enum! {
    /// How many markets in a group may win.
    ResolutionConstraint as "resolution constraint" {
        ExactlyOneWinner = 0 => "exactly_one_winner",
        AtMostOneWinner = 1 => "at_most_one_winner",
    }
}

chain_enum! {
    RpsGesture as "rock-paper-scissors gesture" {
        Rock = 0 => "rock",
        Paper = 1 => "paper",
        Scissors = 2 => "scissors",
        Spock = 3 => "spock",
        Lizard = 4 => "lizard",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::from_hex;
    use serde_json::json;

    #[test]
    fn test_zigzag_encoding() {
        assert_eq!(EventStatus::Upcoming.to_hex(), "00");
        assert_eq!(EventStatus::InProgress.to_hex(), "02");
        assert_eq!(BettingMarketGroupStatus::Canceled.to_hex(), "0e");
        assert_eq!(from_hex::<BetType>("02").unwrap(), BetType::Lay);
        assert!(from_hex::<BetType>("04").is_err());
    }

    #[test]
    fn test_json_names_and_numbers() {
        assert_eq!(BettingMarketResolution::NotWin.to_json(), json!("not_win"));
        assert_eq!(
            BettingMarketResolution::from_json(&json!("cancel")).unwrap(),
            BettingMarketResolution::Cancel
        );
        assert_eq!(RpsGesture::from_json(&json!(4)).unwrap(), RpsGesture::Lizard);
        assert!(RpsGesture::from_json(&json!("dynamite")).is_err());
        assert!(RpsGesture::from_json(&json!(true)).is_err());
    }

    #[test]
    fn test_tables_are_consistent() {
        for s in EventStatus::ALL {
            assert_eq!(EventStatus::from_value(s.value()).unwrap(), *s);
            assert_eq!(s.as_str().parse::<EventStatus>().unwrap(), *s);
        }
    }
}
