//! Equipment identifiers as reported by the replay decoder.
//!
//! The numeric values are grouped in blocks of one hundred per class, which is
//! what [`EquipmentType::class`] relies on and what inventories are sorted by.

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize)]
#[repr(u16)]
pub enum EquipmentType {
    Unknown = 0,

    P2000 = 1,
    Glock = 2,
    P250 = 3,
    Deagle = 4,
    FiveSeven = 5,
    DualBerettas = 6,
    Tec9 = 7,
    Cz = 8,
    Usp = 9,
    Revolver = 10,

    Mp7 = 101,
    Mp9 = 102,
    Bizon = 103,
    Mac10 = 104,
    Ump = 105,
    P90 = 106,
    Mp5 = 107,

    SawedOff = 201,
    Nova = 202,
    Mag7 = 203,
    Xm1014 = 204,
    M249 = 205,
    Negev = 206,

    Galil = 301,
    Famas = 302,
    Ak47 = 303,
    M4a4 = 304,
    M4a1 = 305,
    Scout = 306,
    Sg553 = 307,
    Aug = 308,
    Awp = 309,
    Scar20 = 310,
    G3sg1 = 311,

    Zeus = 401,
    Kevlar = 402,
    Helmet = 403,
    Bomb = 404,
    Knife = 405,
    DefuseKit = 406,
    World = 407,

    Decoy = 501,
    Molotov = 502,
    Incendiary = 503,
    Flash = 504,
    Smoke = 505,
    He = 506,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum EquipmentClass {
    Unknown,
    Pistols,
    Smg,
    Heavy,
    Rifle,
    Equipment,
    Grenade,
}

impl EquipmentType {
    pub fn class(&self) -> EquipmentClass {
        match (*self as u16 + 99) / 100 {
            1 => EquipmentClass::Pistols,
            2 => EquipmentClass::Smg,
            3 => EquipmentClass::Heavy,
            4 => EquipmentClass::Rifle,
            5 => EquipmentClass::Equipment,
            6 => EquipmentClass::Grenade,
            _ => EquipmentClass::Unknown,
        }
    }

    /// Weapons and grenades are what an inventory display shows, everything
    /// else (knife, armor, bomb, kits) is tracked through dedicated flags.
    pub fn is_weapon_or_grenade(&self) -> bool {
        matches!(
            self.class(),
            EquipmentClass::Pistols
                | EquipmentClass::Smg
                | EquipmentClass::Heavy
                | EquipmentClass::Rifle
                | EquipmentClass::Grenade
        )
    }
}
