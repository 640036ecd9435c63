//! Representative net EUR price of a tender.

use tenderlens_core::{MasterTender, Price};

fn eur(price: Option<&Price>) -> Option<f64> {
    price.and_then(|p| p.net_amount_eur)
}

/// First available of:
/// 1. final price
/// 2. estimated price
/// 3. sum of winning-bid prices across lots
/// 4. sum of the lots' estimated prices
///
/// `None` when none of these carries a EUR amount.
pub fn representative_price(tender: &MasterTender) -> Option<f64> {
    if let Some(amount) = eur(tender.final_price.as_ref()) {
        return Some(amount);
    }
    if let Some(amount) = eur(tender.estimated_price.as_ref()) {
        return Some(amount);
    }

    let winning: Vec<f64> = tender
        .lots
        .iter()
        .flat_map(|lot| lot.winning_bids())
        .filter_map(|bid| eur(bid.price.as_ref()))
        .collect();
    if !winning.is_empty() {
        return Some(winning.iter().sum());
    }

    let estimated: Vec<f64> = tender
        .lots
        .iter()
        .filter_map(|lot| eur(lot.estimated_price.as_ref()))
        .collect();
    (!estimated.is_empty()).then(|| estimated.iter().sum())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tenderlens_test_util::{bid, lot, tender, winning_bid};

    #[test]
    fn final_price_wins() {
        let mut t = tender("t1", Some("CZ"));
        t.final_price = Some(Price::eur(10.0));
        t.estimated_price = Some(Price::eur(20.0));
        assert_eq!(representative_price(&t), Some(10.0));
    }

    #[test]
    fn final_price_without_eur_amount_is_skipped() {
        let mut t = tender("t1", Some("CZ"));
        t.final_price = Some(Price {
            net_amount: Some(250.0),
            currency: Some("CZK".to_string()),
            net_amount_eur: None,
        });
        t.estimated_price = Some(Price::eur(20.0));
        assert_eq!(representative_price(&t), Some(20.0));
    }

    #[test]
    fn winning_bids_are_summed_across_lots() {
        let mut t = tender("t1", Some("CZ"));
        t.lots = vec![
            lot(vec![winning_bid(Some(1000.0), vec![]), bid(false, Some(5.0), vec![])]),
            lot(vec![winning_bid(Some(500.0), vec![]), winning_bid(None, vec![])]),
        ];
        assert_eq!(representative_price(&t), Some(1500.0));
    }

    #[test]
    fn single_winning_bid() {
        let mut t = tender("t1", Some("CZ"));
        t.lots = vec![lot(vec![winning_bid(Some(1000.0), vec![])])];
        assert_eq!(representative_price(&t), Some(1000.0));
    }

    #[test]
    fn lot_estimates_are_the_last_resort() {
        let mut t = tender("t1", Some("CZ"));
        let mut first = lot(vec![bid(false, Some(99.0), vec![])]);
        first.estimated_price = Some(Price::eur(300.0));
        let mut second = lot(vec![]);
        second.estimated_price = Some(Price::eur(200.0));
        t.lots = vec![first, second, lot(vec![])];
        assert_eq!(representative_price(&t), Some(500.0));
    }

    #[test]
    fn nothing_priced_is_undetermined() {
        let mut t = tender("t1", Some("CZ"));
        t.lots = vec![lot(vec![winning_bid(None, vec![])])];
        assert_eq!(representative_price(&t), None);
        assert_eq!(representative_price(&tender("t2", None)), None);
    }
}
