//! # Party Resolution
//!
//! The host supplies the characters taking part; the engine only needs their
//! levels and any explicit hit points or armour class.

use crate::PartyMember;

/// Supplies the party members for a calculation.
pub trait PartyResolver {
    fn party_members(&self) -> Vec<PartyMember>;
}

impl PartyResolver for [PartyMember] {
    fn party_members(&self) -> Vec<PartyMember> {
        self.to_vec()
    }
}

impl PartyResolver for Vec<PartyMember> {
    fn party_members(&self) -> Vec<PartyMember> {
        self.clone()
    }
}

impl<T: PartyResolver + ?Sized> PartyResolver for &T {
    fn party_members(&self) -> Vec<PartyMember> {
        (**self).party_members()
    }
}

/// The stand-in party used when no characters are supplied.
pub fn default_party(size: u32, level: u32) -> Vec<PartyMember> {
    (0..size.max(1)).map(|_| PartyMember::new(level)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_party_shape() {
        let party = default_party(4, 3);
        assert_eq!(party.len(), 4);
        assert!(party.iter().all(|m| m.level == 3 && m.hp.is_none() && m.ac.is_none()));
        assert_eq!(default_party(0, 5).len(), 1);
    }

    #[test]
    fn test_vec_and_slice_resolvers() {
        let party = vec![PartyMember::named("Ilsa", 5), PartyMember::new(4).with_hp(40.0)];
        assert_eq!(party.party_members(), party);
        assert_eq!(party.as_slice().party_members().len(), 2);
    }
}
