use ahash::AHashSet;
use tracing::{debug, info};

use crate::{
    census::BlockLocator,
    error::PipelineError,
    geodesy::Coordinate,
    retry::{Exhausted, RetryPolicy},
    types::BlockId,
};

/// Unique block identifiers covering a sample set.
pub type BlockSet = AHashSet<BlockId>;

/// Resolve one point to its block, retrying per `policy`.
pub fn resolve<L>(locator: &L, point: Coordinate, policy: &RetryPolicy) -> Result<BlockId, PipelineError>
where
    L: BlockLocator + ?Sized,
{
    policy.run(format!("resolve {point}"), |_| locator.locate(point))
        .map_err(|Exhausted { attempts, error }| PipelineError::Resolution { point, attempts, source: error })
}

/// Resolve every sample and collect the distinct blocks.
/// Stops at the first point that exhausts its retries.
pub fn deduplicate<L>(locator: &L, samples: &[Coordinate], policy: &RetryPolicy) -> Result<BlockSet, PipelineError>
where
    L: BlockLocator + ?Sized,
{
    let mut blocks = BlockSet::default();

    for (i, point) in samples.iter().enumerate() {
        let block = resolve(locator, *point, policy)?;
        debug!(index = i, %point, %block, "resolved");
        blocks.insert(block);
    }

    info!(samples = samples.len(), blocks = blocks.len(), "deduplicated blocks");
    Ok(blocks)
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;
    use crate::error::LookupError;

    fn block(id: &str) -> BlockId { BlockId::parse(id).unwrap() }

    #[test]
    fn empty_samples_make_no_calls() {
        let calls = Cell::new(0);
        let locator = |_: Coordinate| -> Result<BlockId, LookupError> {
            calls.set(calls.get() + 1);
            Ok(block("160010101001000"))
        };
        let blocks = deduplicate(&locator, &[], &RetryPolicy::immediate(3)).unwrap();
        assert!(blocks.is_empty());
        assert_eq!(calls.get(), 0);
    }

    #[test]
    fn collapses_shared_blocks() {
        let samples = [
            Coordinate::new(43.50, -116.10),
            Coordinate::new(43.51, -116.10),
            Coordinate::new(43.52, -116.10),
        ];
        // Everything north of 43.505 falls in the same block.
        let locator = |p: Coordinate| -> Result<BlockId, LookupError> {
            Ok(if p.lat > 43.505 { block("160010101001000") } else { block("160010101001001") })
        };
        let blocks = deduplicate(&locator, &samples, &RetryPolicy::immediate(3)).unwrap();
        assert_eq!(blocks.len(), 2);
        assert!(blocks.len() <= samples.len());
        assert!(blocks.contains(&block("160010101001000")));
        assert!(blocks.contains(&block("160010101001001")));
    }

    #[test]
    fn transient_failures_are_retried() {
        let calls = Cell::new(0);
        let locator = |_: Coordinate| -> Result<BlockId, LookupError> {
            calls.set(calls.get() + 1);
            if calls.get() < 3 { Err(LookupError::Network("reset".into())) } else { Ok(block("160010101001000")) }
        };
        let id = resolve(&locator, Coordinate::new(43.5, -116.1), &RetryPolicy::immediate(3)).unwrap();
        assert_eq!(id.as_str(), "160010101001000");
        assert_eq!(calls.get(), 3);
    }

    #[test]
    fn exhaustion_aborts_deduplication() {
        let calls = Cell::new(0);
        let bad = Coordinate::new(43.51, -116.10);
        let locator = |p: Coordinate| -> Result<BlockId, LookupError> {
            calls.set(calls.get() + 1);
            if p == bad { Err(LookupError::Status { status: 503, url: "geo".into() }) } else { Ok(block("160010101001000")) }
        };
        let samples = [Coordinate::new(43.50, -116.10), bad, Coordinate::new(43.52, -116.10)];

        let err = deduplicate(&locator, &samples, &RetryPolicy::immediate(3)).unwrap_err();
        match err {
            PipelineError::Resolution { point, attempts, source } => {
                assert_eq!(point, bad);
                assert_eq!(attempts, 3);
                assert_eq!(source, LookupError::Status { status: 503, url: "geo".into() });
            }
            other => panic!("unexpected error {other:?}"),
        }
        // One call for the first point, three for the failing one, none after.
        assert_eq!(calls.get(), 4);
    }
}
