//! Special actions.
//!
//! | Action | Cost (to void) | Effect |
//! |---|---|---|
//! | Early Reinforcement | 2 reserves | second reinforcement this turn |
//! | Ransom | 2 captives | one own void token back to reserve |
//! | Early Route Swap | 2 captives | hand/queue swap now, replaces the SWAP choice |
//! | Evasion | 1 captive + 1 reserve | once per game, opponent's turn, one step |
//! | Forced Yield | none | hand discarded when nothing is playable |

pub mod costs;
pub mod handlers;

pub use costs::Cost;
pub use handlers::{early_reinforcement, early_route_swap, evasion, forced_yield, ransom};
