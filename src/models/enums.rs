//! Closed sets of wire strings
//!
//! Every enum here deserializes from its exact wire spelling and rejects
//! anything else at decode time.

/// Declare an enum backed by a closed set of wire strings
macro_rules! wire_enum {
    (
        $(#[$meta:meta])*
        $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident => $wire:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord,
            ::serde::Serialize, ::serde::Deserialize,
        )]
        pub enum $name {
            $( $(#[$vmeta])* #[serde(rename = $wire)] $variant, )+
        }

        impl $name {
            /// Every member, in declaration order
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            const EXPECTED: &'static str = concat!($($wire, ", "),+);

            /// Parse from the wire spelling
            pub fn parse(value: &str) -> ::core::result::Result<Self, $crate::models::error::ValidationError> {
                match value {
                    $( $wire => Ok($name::$variant), )+
                    _ => Err($crate::models::error::ValidationError::invalid_enum(
                        stringify!($name),
                        value,
                        Self::EXPECTED.trim_end_matches(", "),
                    )),
                }
            }

            /// The wire spelling
            pub fn as_str(&self) -> &'static str {
                match self {
                    $( $name::$variant => $wire, )+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.as_str())
            }
        }

        impl std::str::FromStr for $name {
            type Err = $crate::models::error::ValidationError;

            fn from_str(s: &str) -> ::core::result::Result<Self, Self::Err> {
                Self::parse(s)
            }
        }
    };
}

pub(crate) use wire_enum;

wire_enum! {
    /// Cosmetic item types found in the Battle Royale profile
    CosmeticType {
        Outfit => "AthenaCharacter",
        Backpack => "AthenaBackpack",
        Pet => "AthenaPet",
        PetCarrier => "AthenaPetCarrier",
        Pickaxe => "AthenaPickaxe",
        Glider => "AthenaGlider",
        Contrail => "AthenaSkyDiveContrail",
        Aura => "SparksAura",
        Emote => "AthenaDance",
        Emoticon => "AthenaEmoji",
        Spray => "AthenaSpray",
        Toy => "AthenaToy",
        Wrap => "AthenaItemWrap",
        LobbyMusic => "AthenaMusicPack",
        LoadingScreen => "AthenaLoadingScreen",
        Guitar => "SparksGuitar",
        Bass => "SparksBass",
        Drums => "SparksDrums",
        Microphone => "SparksMicrophone",
        Keytar => "SparksKeyboard",
        CarBody => "VehicleCosmetics_Body",
        Decal => "VehicleCosmetics_Skin",
        Wheel => "VehicleCosmetics_Wheel",
        Trail => "VehicleCosmetics_DriftTrail",
        Boost => "VehicleCosmetics_Booster",
        JamTrack => "SparksSong",
        LegoBuild => "JunoBuildingSet",
        LegoDecorBundle => "JunoBuildingProp",
    }
}

wire_enum! {
    /// Platform a V-Bucks purchase was made on
    PaymentPlatform {
        Epic => "Epic",
        Pc => "EpicPC",
        Android => "EpicAndroid",
        Ios => "EpicIOS",
        PlayStation => "PSN",
        Xbox => "Live",
        Nintendo => "Nintendo",
        Samsung => "Samsung",
        WeGame => "WeGame",
        PcKorea => "EpicPCKorea",
        GooglePlay => "GooglePlay",
        AppStore => "IOSAppStore",
        Shared => "Shared",
    }
}

wire_enum! {
    /// Game mode preset of a Lego world
    LegoWorldMode {
        Cozy => "Cozy",
        Survival => "Survival",
        Sandbox => "Sandbox",
        Hardcore => "Hardcore",
    }
}

wire_enum! {
    LegoWorldDifficulty {
        Easy => "Easy",
        Normal => "Normal",
        Hardcore => "Hardcore",
    }
}

wire_enum! {
    /// What happens when a player dies in a Lego world
    LegoWorldDeathType {
        On => "On",
        Off => "Off",
        Permanent => "Permanent",
    }
}

wire_enum! {
    /// Discriminator selecting the shape of a Lego world's `metadata`
    LegoWorldMetadataConstraint {
        Default => "juno_default",
        NoMetadata => "nometadata",
    }
}

wire_enum! {
    LegoWorldGrantRole {
        WorldOwner => "world_owner",
        Keyholder => "juno_keyholder",
    }
}

wire_enum! {
    LegoWorldGrantType {
        Persistent => "PERSISTENT",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::error::ValidationErrorKind;

    #[test]
    fn test_parse_and_display_round_trip() {
        for cosmetic in CosmeticType::ALL {
            assert_eq!(CosmeticType::parse(cosmetic.as_str()).unwrap(), *cosmetic);
            assert_eq!(cosmetic.to_string(), cosmetic.as_str());
        }
        assert_eq!(CosmeticType::ALL.len(), 28);
        assert_eq!(PaymentPlatform::ALL.len(), 13);
    }

    #[test]
    fn test_parse_is_case_sensitive() {
        assert_eq!(LegoWorldMode::parse("Cozy").unwrap(), LegoWorldMode::Cozy);
        assert!(LegoWorldMode::parse("cozy").is_err());
        assert!(LegoWorldMode::parse("").is_err());
    }

    #[test]
    fn test_parse_error_lists_expected_values() {
        let err = LegoWorldDifficulty::parse("Nightmare").unwrap_err();
        assert_eq!(
            err.kind,
            ValidationErrorKind::InvalidEnumValue {
                expected: "Easy, Normal, Hardcore"
            }
        );
        assert_eq!(err.field, "LegoWorldDifficulty");
    }

    #[test]
    fn test_serde_uses_wire_spelling() {
        let json = serde_json::to_string(&LegoWorldGrantRole::Keyholder).unwrap();
        assert_eq!(json, "\"juno_keyholder\"");

        let platform: PaymentPlatform = serde_json::from_str("\"Live\"").unwrap();
        assert_eq!(platform, PaymentPlatform::Xbox);

        assert!(serde_json::from_str::<LegoWorldGrantType>("\"TEMPORARY\"").is_err());
    }

    #[test]
    fn test_from_str() {
        let constraint: LegoWorldMetadataConstraint = "nometadata".parse().unwrap();
        assert_eq!(constraint, LegoWorldMetadataConstraint::NoMetadata);
        assert!("juno".parse::<LegoWorldMetadataConstraint>().is_err());
    }
}
