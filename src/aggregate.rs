use tracing::{debug, info};

use crate::{
    census::StatsSource,
    error::PipelineError,
    retry::{Exhausted, RetryPolicy},
    types::BlockId,
};

/// Fetch `attribute` for one block, retrying per `policy`.
pub fn block_value<S>(stats: &S, block: &BlockId, attribute: &str, api_key: Option<&str>, policy: &RetryPolicy) -> Result<u64, PipelineError>
where
    S: StatsSource + ?Sized,
{
    let parts = block.parts();
    policy.run(format!("query {block}"), |_| stats.query_attribute(&parts, attribute, api_key))
        .map_err(|Exhausted { attempts, error }| PipelineError::Aggregation { block: block.clone(), attempts, source: error })
}

/// Sum `attribute` over `blocks`. The first block that exhausts its retries aborts the sum.
pub fn aggregate<'a, S, I>(stats: &S, blocks: I, attribute: &str, api_key: Option<&str>, policy: &RetryPolicy) -> Result<u64, PipelineError>
where
    S: StatsSource + ?Sized,
    I: IntoIterator<Item = &'a BlockId>,
{
    let mut total: u64 = 0;
    let mut count = 0usize;

    for block in blocks {
        let value = block_value(stats, block, attribute, api_key, policy)?;
        debug!(%block, value, "block value");
        total = total.saturating_add(value);
        count += 1;
    }

    info!(blocks = count, total, attribute, "aggregated");
    Ok(total)
}

#[cfg(test)]
mod tests {
    use std::cell::{Cell, RefCell};

    use super::*;
    use crate::{error::LookupError, types::BlockParts};

    fn block(id: &str) -> BlockId { BlockId::parse(id).unwrap() }

    /// Population keyed on the block sub-field.
    fn by_block_code(parts: &BlockParts<'_>, _: &str, _: Option<&str>) -> Result<u64, LookupError> {
        parts.block.parse::<u64>().map_err(|e| LookupError::Parse(e.to_string()))
    }

    #[test]
    fn sums_block_values() {
        let blocks = [block("160010101001000"), block("160010101000007"), block("160010101000035")];
        let total = aggregate(&by_block_code, &blocks, "P1_001N", None, &RetryPolicy::immediate(3)).unwrap();
        assert_eq!(total, 1042);
    }

    #[test]
    fn total_is_order_independent() {
        let mut blocks = vec![block("160010101001000"), block("160010101000007"), block("160010101000035")];
        let forward = aggregate(&by_block_code, &blocks, "P1_001N", None, &RetryPolicy::immediate(3)).unwrap();
        blocks.reverse();
        let backward = aggregate(&by_block_code, &blocks, "P1_001N", None, &RetryPolicy::immediate(3)).unwrap();
        blocks.swap(0, 1);
        let shuffled = aggregate(&by_block_code, &blocks, "P1_001N", None, &RetryPolicy::immediate(3)).unwrap();
        assert_eq!(forward, backward);
        assert_eq!(forward, shuffled);
    }

    #[test]
    fn empty_block_set_is_zero() {
        let calls = Cell::new(0);
        let stats = |_: &BlockParts<'_>, _: &str, _: Option<&str>| -> Result<u64, LookupError> {
            calls.set(calls.get() + 1);
            Ok(1)
        };
        let total = aggregate(&stats, &Vec::<BlockId>::new(), "P1_001N", None, &RetryPolicy::immediate(3)).unwrap();
        assert_eq!(total, 0);
        assert_eq!(calls.get(), 0);
    }

    #[test]
    fn query_gets_parts_attribute_and_key() {
        let seen = RefCell::new(Vec::new());
        let stats = |parts: &BlockParts<'_>, attribute: &str, key: Option<&str>| -> Result<u64, LookupError> {
            seen.borrow_mut().push((
                format!("{}|{}|{}|{}", parts.state, parts.county, parts.tract, parts.block),
                attribute.to_string(),
                key.map(str::to_string),
            ));
            Ok(5)
        };
        let blocks = [block("160010101001000")];
        aggregate(&stats, &blocks, "P1_001N", Some("secret"), &RetryPolicy::immediate(3)).unwrap();

        assert_eq!(seen.into_inner(), vec![(
            "16|001|010100|1000".to_string(),
            "P1_001N".to_string(),
            Some("secret".to_string()),
        )]);
    }

    #[test]
    fn fails_twice_then_succeeds() {
        let calls = Cell::new(0);
        let stats = |_: &BlockParts<'_>, _: &str, _: Option<&str>| -> Result<u64, LookupError> {
            calls.set(calls.get() + 1);
            if calls.get() <= 2 { Err(LookupError::Status { status: 500, url: "stats".into() }) } else { Ok(42) }
        };
        let total = aggregate(&stats, &[block("160010101001000")], "P1_001N", None, &RetryPolicy::immediate(3)).unwrap();
        assert_eq!(total, 42);
        assert_eq!(calls.get(), 3);
    }

    #[test]
    fn unparseable_value_exhausts_into_aggregation_error() {
        let calls = Cell::new(0);
        let stats = |_: &BlockParts<'_>, _: &str, _: Option<&str>| -> Result<u64, LookupError> {
            calls.set(calls.get() + 1);
            Err(LookupError::Parse("expected a non-negative integer".into()))
        };
        let target = block("160010101001000");
        let err = aggregate(&stats, [&target], "P1_001N", None, &RetryPolicy::immediate(3)).unwrap_err();
        assert_eq!(calls.get(), 3);
        assert!(matches!(err, PipelineError::Aggregation { ref block, attempts: 3, source: LookupError::Parse(_) } if *block == target));
    }
}
