//! Positional lot and bid ids.
//!
//! Lot `k` (0-based) of tender group `G` is `G_{k+1}`; bid `j` of that lot is `G_{k+1}_{j+1}`.
//! Ids are recomputed on every pass, so they shift when upstream ordering changes.

use crate::context::FusionContext;
use crate::engine::{FusionError, FusionPlugin};
use tenderlens_core::{MasterTender, Observation};

pub struct LotAndBidIdsPlugin;

pub fn lot_id(tender_group_id: &str, lot_index: usize) -> String {
    format!("{}_{}", tender_group_id, lot_index + 1)
}

pub fn bid_id(lot_id: &str, bid_index: usize) -> String {
    format!("{}_{}", lot_id, bid_index + 1)
}

pub fn assign_ids(tender: &mut MasterTender) {
    let group_id = tender.group_id.clone();
    for (k, lot) in tender.lots.iter_mut().enumerate() {
        let id = lot_id(&group_id, k);
        for (j, bid) in lot.bids.iter_mut().enumerate() {
            bid.bid_id = Some(bid_id(&id, j));
        }
        lot.lot_id = Some(id);
    }
}

impl<O> FusionPlugin<O, MasterTender> for LotAndBidIdsPlugin {
    fn name(&self) -> &'static str {
        "lot_and_bid_ids"
    }

    fn fuse(
        &self,
        _observations: &[Observation<O>],
        record: &mut MasterTender,
        _ctx: &FusionContext<'_>,
    ) -> Result<(), FusionError> {
        assign_ids(record);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tenderlens_test_util::{lot, tender, winning_bid};

    #[test]
    fn ids_follow_position() {
        let mut t = tender("g7", None);
        t.lots = vec![
            lot(vec![winning_bid(None, vec![])]),
            lot(vec![winning_bid(None, vec![]), winning_bid(None, vec![])]),
        ];
        assign_ids(&mut t);

        assert_eq!(t.lots[0].lot_id.as_deref(), Some("g7_1"));
        assert_eq!(t.lots[1].lot_id.as_deref(), Some("g7_2"));
        assert_eq!(t.lots[1].bids[1].bid_id.as_deref(), Some("g7_2_2"));
    }

    #[test]
    fn reordering_lots_reassigns_ids() {
        let mut t = tender("g7", None);
        let mut first = lot(vec![]);
        first.title = Some("roads".to_string());
        let mut second = lot(vec![]);
        second.title = Some("bridges".to_string());
        t.lots = vec![first, second];
        assign_ids(&mut t);

        t.lots.reverse();
        assign_ids(&mut t);
        assert_eq!(t.lots[0].title.as_deref(), Some("bridges"));
        assert_eq!(t.lots[0].lot_id.as_deref(), Some("g7_1"));
    }
}
