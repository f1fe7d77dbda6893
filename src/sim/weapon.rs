//! Weapon catalog
//!
//! Base stats are a fixed table. Temporary damage boosts are layered on top as
//! `{amount, expiry}` modifiers and summed on read, so expiring a boost can
//! never drift the base value.

use serde::{Deserialize, Serialize};

/// Weapon identifiers, in switch-cycle order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum WeaponId {
    #[default]
    Pistol,
    Shotgun,
    Rifle,
    Sniper,
    Machinegun,
}

impl WeaponId {
    pub const ALL: [WeaponId; 5] = [
        WeaponId::Pistol,
        WeaponId::Shotgun,
        WeaponId::Rifle,
        WeaponId::Sniper,
        WeaponId::Machinegun,
    ];

    fn index(self) -> usize {
        match self {
            WeaponId::Pistol => 0,
            WeaponId::Shotgun => 1,
            WeaponId::Rifle => 2,
            WeaponId::Sniper => 3,
            WeaponId::Machinegun => 4,
        }
    }

    /// Next weapon in the cycle (wraps)
    pub fn next(self) -> WeaponId {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            WeaponId::Pistol => "pistol",
            WeaponId::Shotgun => "shotgun",
            WeaponId::Rifle => "rifle",
            WeaponId::Sniper => "sniper",
            WeaponId::Machinegun => "machinegun",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "pistol" => Some(WeaponId::Pistol),
            "shotgun" => Some(WeaponId::Shotgun),
            "rifle" => Some(WeaponId::Rifle),
            "sniper" => Some(WeaponId::Sniper),
            "machinegun" | "mg" => Some(WeaponId::Machinegun),
            _ => None,
        }
    }
}

/// Immutable weapon stats
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeaponDef {
    pub id: WeaponId,
    /// Damage per projectile
    pub damage: f32,
    /// Minimum interval between shots
    pub fire_rate_ms: f64,
    pub max_ammo: u32,
    /// Total angular deviation window (radians); each pellet deviates by ±spread/2
    pub spread: f32,
    /// Pixels per reference frame
    pub projectile_speed: f32,
    pub range: f32,
    /// Projectiles per shot
    pub pellets: u32,
    /// RGB tag shared by projectiles and muzzle flash
    pub color: u32,
    pub name: &'static str,
    pub caliber: &'static str,
}

const WEAPONS: [WeaponDef; 5] = [
    WeaponDef {
        id: WeaponId::Pistol,
        damage: 25.0,
        fire_rate_ms: 300.0,
        max_ammo: 15,
        spread: 0.05,
        projectile_speed: 8.0,
        range: 250.0,
        pellets: 1,
        color: 0xffff00,
        name: "Glock 17",
        caliber: "9mm Parabellum",
    },
    WeaponDef {
        id: WeaponId::Shotgun,
        damage: 60.0,
        fire_rate_ms: 800.0,
        max_ammo: 8,
        spread: 0.4,
        projectile_speed: 6.0,
        range: 150.0,
        pellets: 5,
        color: 0xff6600,
        name: "Remington 870",
        caliber: "12 Gauge",
    },
    WeaponDef {
        id: WeaponId::Rifle,
        damage: 45.0,
        fire_rate_ms: 150.0,
        max_ammo: 30,
        spread: 0.02,
        projectile_speed: 12.0,
        range: 400.0,
        pellets: 1,
        color: 0x00ffff,
        name: "M4A1",
        caliber: "5.56x45mm NATO",
    },
    WeaponDef {
        id: WeaponId::Sniper,
        damage: 100.0,
        fire_rate_ms: 1200.0,
        max_ammo: 10,
        spread: 0.01,
        projectile_speed: 15.0,
        range: 600.0,
        pellets: 1,
        color: 0xff00ff,
        name: "M24 SWS",
        caliber: ".308 Winchester",
    },
    WeaponDef {
        id: WeaponId::Machinegun,
        damage: 35.0,
        fire_rate_ms: 80.0,
        max_ammo: 100,
        spread: 0.2,
        projectile_speed: 10.0,
        range: 350.0,
        pellets: 1,
        color: 0xff0066,
        name: "M249 SAW",
        caliber: "7.62x51mm NATO",
    },
];

/// Damage power-up: bonus per weapon and how long it lasts
pub const DAMAGE_BOOST_AMOUNT: f32 = 1.0;
pub const DAMAGE_BOOST_DURATION_MS: f64 = 10_000.0;

/// A temporary additive damage bonus applied to every weapon
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DamageModifier {
    pub amount: f32,
    pub expires_at_ms: f64,
}

impl DamageModifier {
    #[inline]
    pub fn is_active(&self, now_ms: f64) -> bool {
        now_ms < self.expires_at_ms
    }
}

/// Weapon table plus the active damage modifiers
#[derive(Debug, Clone, Default)]
pub struct WeaponCatalog {
    modifiers: Vec<DamageModifier>,
}

impl WeaponCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Base (unmodified) stats
    pub fn get(&self, id: WeaponId) -> &'static WeaponDef {
        &WEAPONS[id.index()]
    }

    pub fn next_id(&self, id: WeaponId) -> WeaponId {
        id.next()
    }

    /// Base damage plus every modifier still active at `now_ms`
    pub fn effective_damage(&self, id: WeaponId, now_ms: f64) -> f32 {
        let bonus: f32 = self
            .modifiers
            .iter()
            .filter(|m| m.is_active(now_ms))
            .map(|m| m.amount)
            .sum();
        self.get(id).damage + bonus
    }

    /// Stats with modifiers folded in
    pub fn effective(&self, id: WeaponId, now_ms: f64) -> WeaponDef {
        WeaponDef {
            damage: self.effective_damage(id, now_ms),
            ..*self.get(id)
        }
    }

    pub fn apply_damage_boost(&mut self, amount: f32, now_ms: f64, duration_ms: f64) {
        self.modifiers.push(DamageModifier {
            amount,
            expires_at_ms: now_ms + duration_ms,
        });
    }

    /// Drop modifiers whose deadline has passed; returns how many expired
    pub fn prune_expired(&mut self, now_ms: f64) -> usize {
        let before = self.modifiers.len();
        self.modifiers.retain(|m| m.is_active(now_ms));
        before - self.modifiers.len()
    }

    pub fn clear_modifiers(&mut self) {
        self.modifiers.clear();
    }

    pub fn active_modifiers(&self) -> &[DamageModifier] {
        &self.modifiers
    }
}
