//! Weapons bought with collected coins.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::entities::{Player, PlayerId};

/// Catalog slots each player can reach from the keyboard.
pub const SHOP_SLOTS: usize = 3;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Weapon {
    pub name: String,
    pub price: u32,
    /// Replaces the wielder's base damage.
    pub damage: u32,
}

impl Weapon {
    pub fn new(name: impl Into<String>, price: u32, damage: u32) -> Self {
        Weapon {
            name: name.into(),
            price,
            damage,
        }
    }

    pub fn default_catalog() -> Vec<Weapon> {
        vec![
            Weapon::new("Crowbar", 300, 15),
            Weapon::new("Machete", 750, 25),
            Weapon::new("Chainsaw", 1500, 40),
        ]
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ShopError {
    #[error("no weapon at catalog slot {0}")]
    UnknownWeapon(usize),
    #[error("{player:?} has {have} coins but {name} costs {price}")]
    InsufficientCoins {
        player: PlayerId,
        name: String,
        price: u32,
        have: u32,
    },
    #[error("{0:?} is down and cannot shop")]
    PlayerDown(PlayerId),
}

/// Spend `player`'s coins on catalog slot `index` and equip the weapon.
pub fn purchase<'a>(
    player: &mut Player,
    catalog: &'a [Weapon],
    index: usize,
) -> Result<&'a Weapon, ShopError> {
    let weapon = catalog.get(index).ok_or(ShopError::UnknownWeapon(index))?;
    if !player.is_alive() {
        return Err(ShopError::PlayerDown(player.id));
    }
    if player.coins < weapon.price {
        return Err(ShopError::InsufficientCoins {
            player: player.id,
            name: weapon.name.clone(),
            price: weapon.price,
            have: player.coins,
        });
    }
    player.coins -= weapon.price;
    player.equip(weapon.clone());
    debug!(player = ?player.id, weapon = %weapon.name, coins_left = player.coins, "weapon purchased");
    Ok(weapon)
}
