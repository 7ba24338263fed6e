use crate::domain::types::{Action, Branch};

/// Highest number of simultaneous passengers a branch ever carries. This is
/// what a cab's seat count must cover -- not the total number of pickups,
/// which over-counts pools where early passengers are dropped off before
/// later ones board.
pub fn peak_passengers(branch: &Branch) -> u32 {
    let mut current: i32 = 0;
    let mut peak: i32 = 0;
    for &(_, action) in &branch.actions {
        match action {
            Action::In => {
                current += 1;
                if current > peak {
                    peak = current;
                }
            }
            Action::Out => current -= 1,
        }
    }
    peak.max(0) as u32
}

/// True if some order is picked up (`In`) in both branches -- the two pools
/// would compete for the same passenger.
pub fn is_found(a: &Branch, b: &Branch) -> bool {
    a.actions.iter().any(|&(idx, action)| {
        action == Action::In
            && b.actions
                .iter()
                .any(|&(other_idx, other_action)| other_action == Action::In && other_idx == idx)
    })
}

/// A branch that survived dedup and assignment: ready to hand back to the caller.
#[derive(Debug, Clone)]
pub struct AcceptedPool {
    pub cost: i32,
    pub actions: Vec<(usize, Action)>,
    pub cab: usize,
}

impl From<&Branch> for AcceptedPool {
    fn from(b: &Branch) -> Self {
        AcceptedPool {
            cost: b.cost,
            actions: b.actions.clone(),
            cab: b.cab.expect("accepted branch must carry a cab"),
        }
    }
}
