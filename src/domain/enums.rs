//! Closed sets of request values.
//!
//! Requests carry these as plain strings so that an unknown value becomes a
//! readable validation message rather than a deserialization failure. Each
//! enum parses from, and renders back to, its wire spelling.

use serde::{Serialize, Serializer};
use std::fmt;

macro_rules! wire_enum {
    ($name:ident { $($variant:ident => $wire:literal),+ $(,)? }) => {
        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn parse(value: &str) -> Option<Self> {
                match value {
                    $($wire => Some($name::$variant),)+
                    _ => None,
                }
            }

            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $wire,)+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl Serialize for $name {
            fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
            where
                S: Serializer,
            {
                serializer.serialize_str(self.as_str())
            }
        }
    };
}

/// CRM targets the export pipeline supports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CrmType {
    Salesforce,
}

wire_enum!(CrmType { Salesforce => "SALESFORCE" });

/// Record kinds that can be exported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssetType {
    Lead,
    Contact,
}

wire_enum!(AssetType { Lead => "LEAD", Contact => "CONTACT" });

impl AssetType {
    /// Integration-status flag that grants export of this asset type.
    pub fn permission_flag(&self) -> &'static str {
        match self {
            AssetType::Lead => "lead",
            AssetType::Contact => "accounts_and_contacts",
        }
    }
}

/// Tag on a batched reveal call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RevealType {
    /// Contacts the account has revealed before.
    Existing,
    /// Contacts being revealed for the first time.
    New,
}

wire_enum!(RevealType { Existing => "EXISTING", New => "NEW" });

/// Customer list families.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListType {
    Lead,
    Account,
}

wire_enum!(ListType { Lead => "LEAD", Account => "ACCOUNT" });

impl ListType {
    /// Key of the item array inside the response `data` object.
    pub fn items_key(&self) -> &'static str {
        match self {
            ListType::Lead => "leadLists",
            ListType::Account => "accountLists",
        }
    }

    /// Field holding an item's status in the raw backend record.
    pub fn status_field(&self) -> &'static str {
        match self {
            ListType::Lead => "listStatus",
            ListType::Account => "status",
        }
    }
}

/// CRM systems whose records can be searched by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MmiCrmType {
    Salesforce,
    Hubspot,
    Dynamics,
    Marketo,
}

wire_enum!(MmiCrmType {
    Salesforce => "SALESFORCE",
    Hubspot => "HUBSPOT",
    Dynamics => "DYNAMICS",
    Marketo => "MARKETO",
});

/// CRM entity searched by an MMI lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum EntityType {
    #[default]
    Lead,
    Contact,
    Account,
}

wire_enum!(EntityType {
    Lead => "LEAD",
    Contact => "CONTACT",
    Account => "ACCOUNT",
});

impl EntityType {
    pub fn path_segment(&self) -> &'static str {
        match self {
            EntityType::Lead => "lead",
            EntityType::Contact => "contact",
            EntityType::Account => "account",
        }
    }
}
