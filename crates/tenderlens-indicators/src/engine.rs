use crate::plugin::{IndicatorContext, IndicatorError};
use crate::registry::IndicatorSuite;
use tenderlens_core::MasterTender;
use tenderlens_types::{Indicator, IndicatorStatus};
use tracing::debug;

/// Counts per status across the tender and its lots.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScoreSummary {
    pub calculated: usize,
    pub insufficient: usize,
    pub undefined: usize,
}

impl ScoreSummary {
    fn record(&mut self, status: IndicatorStatus) {
        match status {
            IndicatorStatus::Calculated => self.calculated += 1,
            IndicatorStatus::Insufficient => self.insufficient += 1,
            IndicatorStatus::Undefined => self.undefined += 1,
        }
    }
}

/// Evaluate every tender-level rule, then every lot-level rule per lot.
///
/// Results replace the previous indicator lists only once all rules have succeeded; on error the
/// tender is left untouched.
pub fn score_tender(
    suite: &IndicatorSuite,
    tender: &mut MasterTender,
    ctx: &IndicatorContext<'_>,
) -> Result<ScoreSummary, IndicatorError> {
    let mut summary = ScoreSummary::default();

    let mut tender_indicators = Vec::new();
    for (name, rule) in suite.tender_rules() {
        let result = rule.evaluate(tender, ctx)?;
        debug!(tender_id = %tender.id, indicator = name, status = ?result.status(), "tender indicator");
        summary.record(result.status());
        tender_indicators.push(Indicator::new(rule.indicator_type(), result));
    }

    let mut lot_indicators = Vec::with_capacity(tender.lots.len());
    for lot in &tender.lots {
        let mut indicators = Vec::new();
        for (name, rule) in suite.lot_rules() {
            let result = rule.evaluate(lot, tender, ctx)?;
            debug!(
                tender_id = %tender.id,
                lot_id = lot.lot_id.as_deref().unwrap_or("-"),
                indicator = name,
                status = ?result.status(),
                "lot indicator"
            );
            summary.record(result.status());
            indicators.push(Indicator::new(rule.indicator_type(), result));
        }
        lot_indicators.push(indicators);
    }

    tender.indicators = tender_indicators;
    for (lot, indicators) in tender.lots.iter_mut().zip(lot_indicators) {
        lot.indicators = indicators;
    }
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::IndicatorSelection;
    use crate::test_support::{params, published_tender};
    use tenderlens_core::MapConfig;
    use tenderlens_test_util::{body, datetime, lot, populated, winning_bid};
    use tenderlens_types::ids;

    fn suite() -> IndicatorSuite {
        IndicatorSuite::from_selection(&IndicatorSelection {
            tender_level: vec![
                ids::RULE_ADVERTISEMENT_PERIOD.to_string(),
                ids::RULE_TAX_HAVEN.to_string(),
                ids::RULE_VALUE_MISSING.to_string(),
            ],
            lot_level: vec![ids::RULE_VALUE_MISSING.to_string()],
        })
    }

    fn scored_tender() -> MasterTender {
        let mut t = published_tender(Some("CZ"));
        t.bid_deadline = Some(datetime("2024-03-15T12:00:00"));
        t.buyers = vec![populated(body("buyer", Some("Praha"), Some("CZ")))];
        t.lots = vec![lot(vec![winning_bid(
            Some(10.0),
            vec![populated(body("winner", Some("Stavby"), Some("CZ")))],
        )])];
        t
    }

    #[test]
    fn scores_tender_and_lots() {
        let p = params(&[("indicator.CZ.advertisementPeriod.100.length", "5-30")]);
        let mut t = scored_tender();

        let summary = score_tender(&suite(), &mut t, &IndicatorContext::new(&p)).expect("score");
        assert_eq!(
            summary,
            ScoreSummary {
                calculated: 4,
                insufficient: 0,
                undefined: 0
            }
        );

        insta::assert_json_snapshot!(t.indicators, @r###"
        [
          {
            "type": "INTEGRITY_ADVERTISEMENT_PERIOD",
            "status": "CALCULATED",
            "value": 100.0,
            "metadata": {
              "advertisementPeriodLength": 10,
              "bidDeadline": "2024-03-15T12:00:00",
              "callForTenderDate": "2024-03-05"
            }
          },
          {
            "type": "INTEGRITY_TAX_HAVEN",
            "status": "CALCULATED",
            "value": 100.0,
            "metadata": {
              "lotsCalculated": 1
            }
          },
          {
            "type": "TRANSPARENCY_VALUE_MISSING",
            "status": "CALCULATED",
            "value": 100.0,
            "metadata": {
              "lotsCalculated": 1
            }
          }
        ]
        "###);
        assert_eq!(t.lots[0].indicators.len(), 1);
        assert_eq!(t.lots[0].indicators[0].result.score(), Some(100.0));
    }

    #[test]
    fn rescoring_replaces_previous_results() {
        let p = params(&[("indicator.CZ.advertisementPeriod.100.length", "5-30")]);
        let mut t = scored_tender();
        let ctx = IndicatorContext::new(&p);
        score_tender(&suite(), &mut t, &ctx).expect("first pass");
        score_tender(&suite(), &mut t, &ctx).expect("second pass");
        assert_eq!(t.indicators.len(), 3);
        assert_eq!(t.lots[0].indicators.len(), 1);
    }

    #[test]
    fn malformed_interval_leaves_tender_untouched() {
        let p = MapConfig::new().with("indicator.CZ.advertisementPeriod.100.length", "ten-30");
        let mut t = scored_tender();
        let before = t.clone();

        let err = score_tender(&suite(), &mut t, &IndicatorContext::new(&p))
            .expect_err("malformed interval");
        assert!(matches!(err, IndicatorError::MalformedInterval { .. }));
        assert_eq!(t, before);
    }
}
