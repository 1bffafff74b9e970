// Per-request behavior parameters.
//
// The genome is an ordered, dash-separated vector of integers mapped
// positionally onto named slots; a missing or unparseable slot keeps its
// documented default, so a half-formed encoding still produces a usable
// snake. Traits are dash-separated tokens that switch individual strategy
// rules on.

/// Default slot values, in encoding order.
const DEFAULT_SLOTS: [i64; 10] = [
    10,    // base cost
    500,   // head danger cost
    5,     // body danger cost
    50,    // wall danger cost
    10000, // trap danger cost
    400,   // max cost considered safe
    40,    // peckish threshold
    20,    // starving threshold
    20,    // max opportunistic eat cost
    0,     // food cost
];

/// Numeric weights and thresholds consumed by the cost model and the
/// strategy rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Genome {
    pub base_cost: i64,
    pub head_danger_cost: i64,
    pub body_danger_cost: i64,
    pub wall_danger_cost: i64,
    pub trap_danger_cost: i64,
    pub max_cost_considered_safe: i64,
    pub peckish_threshold: i64,
    pub starving_threshold: i64,
    pub max_opportunistic_eat_cost: i64,
    pub food_cost: i64,
}

impl Default for Genome {
    fn default() -> Self {
        Genome::from_slots(DEFAULT_SLOTS)
    }
}

impl Genome {
    fn from_slots(slots: [i64; 10]) -> Self {
        Genome {
            base_cost: slots[0],
            head_danger_cost: slots[1],
            body_danger_cost: slots[2],
            wall_danger_cost: slots[3],
            trap_danger_cost: slots[4],
            max_cost_considered_safe: slots[5],
            peckish_threshold: slots[6],
            starving_threshold: slots[7],
            max_opportunistic_eat_cost: slots[8],
            food_cost: slots[9],
        }
    }

    /// Parses a dash-separated slot encoding. `None` or an empty string
    /// yields the full default vector; individual bad slots fall back to
    /// their own default. Slots beyond the known ten are ignored.
    pub fn parse(encoded: Option<&str>) -> Self {
        let mut slots = DEFAULT_SLOTS;
        if let Some(encoded) = encoded {
            for (i, token) in encoded.split('-').take(slots.len()).enumerate() {
                if let Ok(value) = token.trim().parse() {
                    slots[i] = value;
                }
            }
        }
        Genome::from_slots(slots)
    }
}

/// Boolean flags gating the optional strategy rules.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TraitSet {
    pub opportunistic: bool,
    pub aggressive: bool,
    pub gluttonous: bool,
    pub insecure: bool,
    pub foresighted: bool,
    pub cooperative: bool,
}

impl TraitSet {
    /// Parses dash-separated trait tokens. Unknown tokens are ignored;
    /// absence of a token leaves its behavior disabled.
    pub fn parse(encoded: Option<&str>) -> Self {
        let mut traits = TraitSet::default();
        if let Some(encoded) = encoded {
            for token in encoded.split('-') {
                match token.trim() {
                    "opp" => traits.opportunistic = true,
                    "agg" => traits.aggressive = true,
                    "glu" => traits.gluttonous = true,
                    "ins" => traits.insecure = true,
                    "for" => traits.foresighted = true,
                    "coo" => traits.cooperative = true,
                    _ => {}
                }
            }
        }
        traits
    }
}
