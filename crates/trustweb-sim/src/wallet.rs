use rand::Rng;
use serde::Serialize;

use trustweb_core::{Address, ClaimData, ClaimValue, Role, TrustResult};
use trustweb_engine::IdentityRegistry;

use crate::config::SimulationConfig;

/// Upper bound of the creditworthiness score.
pub const MAX_CREDITWORTHINESS: i64 = 100;

/// A simulated participant and the facts that are actually true about it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Wallet {
    pub address: Address,
    pub role: Role,
    /// Ground truth, keyed by claim.
    pub truth: ClaimData,
}

impl Wallet {
    /// Ground-truth value for `claim`, if the wallet has one.
    pub fn fact(&self, claim: &str) -> Option<&ClaimValue> {
        self.truth.get(claim)
    }

    /// Whether this wallet reports ground truth when attesting.
    pub fn is_truthful(&self) -> bool {
        !matches!(self.role, Role::Dishonest)
    }
}

/// The full set of simulated wallets, in address order of creation.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Wallets {
    wallets: Vec<Wallet>,
}

impl Wallets {
    /// Look up a wallet by address.
    pub fn get(&self, address: &Address) -> Option<&Wallet> {
        self.wallets.iter().find(|w| &w.address == address)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Wallet> {
        self.wallets.iter()
    }

    pub fn as_slice(&self) -> &[Wallet] {
        &self.wallets
    }

    /// Wallets holding `role`.
    pub fn with_role(&self, role: Role) -> impl Iterator<Item = &Wallet> {
        self.wallets.iter().filter(move |w| w.role == role)
    }

    pub fn len(&self) -> usize {
        self.wallets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.wallets.is_empty()
    }

    /// Register every wallet in a fresh registry for `claims`.
    pub fn to_registry(&self, claims: &[String]) -> TrustResult<IdentityRegistry> {
        let mut registry = IdentityRegistry::with_claims(claims);
        for wallet in &self.wallets {
            registry.register(wallet.address.clone(), wallet.role)?;
        }
        Ok(registry)
    }
}

/// Create `config.num_wallets` wallets named `address1..addressN`.
///
/// The first `num_dishonest` wallets are dishonest and the last
/// `num_trusted` are trusted; everyone in between is honest.
pub fn generate_wallets<R: Rng + ?Sized>(config: &SimulationConfig, rng: &mut R) -> Wallets {
    let total = config.num_wallets;
    let dishonest = config.num_dishonest();
    let trusted_from = total.saturating_sub(config.num_trusted);

    let wallets = (0..total)
        .map(|i| {
            let role = if i < dishonest {
                Role::Dishonest
            } else if i >= trusted_from {
                Role::Trusted
            } else {
                Role::Honest
            };
            Wallet {
                address: Address::new(format!("address{}", i + 1)),
                role,
                truth: random_truth(rng),
            }
        })
        .collect();

    Wallets { wallets }
}

fn random_truth<R: Rng + ?Sized>(rng: &mut R) -> ClaimData {
    let is_human = rng.gen_bool(0.5);
    let mut truth = ClaimData::new();
    truth.insert("is_human".into(), ClaimValue::Boolean(is_human));
    truth.insert("is_bot".into(), ClaimValue::Boolean(!is_human));
    truth.insert(
        "creditworthiness".into(),
        ClaimValue::Integer(rng.gen_range(0..=MAX_CREDITWORTHINESS)),
    );
    truth
}

/// A plausible but arbitrary value for `claim`.
pub(crate) fn random_value<R: Rng + ?Sized>(claim: &str, rng: &mut R) -> ClaimValue {
    match claim {
        "creditworthiness" => ClaimValue::Integer(rng.gen_range(0..=MAX_CREDITWORTHINESS)),
        _ => ClaimValue::Boolean(rng.gen_bool(0.5)),
    }
}
