//! Operation chain executor.
//!
//! Applies an [`OperationChain`] step by step to one in-memory image. Each step
//! consumes the previous step's output; the `modified` flag is the OR of every
//! step's own flag, optionally overridden by a final pixel comparison against
//! the input.

use super::backend::ValidationError;
use super::extend::extend;
use super::params::{Operation, OperationChain};
use super::trim::trim;
use image::DynamicImage;

/// Same dimensions, same color layout, same samples.
pub fn images_identical(a: &DynamicImage, b: &DynamicImage) -> bool {
    a.width() == b.width()
        && a.height() == b.height()
        && a.color() == b.color()
        && a.as_bytes() == b.as_bytes()
}

/// Run a single operation, returning the new image and whether it changed.
pub fn apply_operation(
    image: DynamicImage,
    operation: Operation,
) -> Result<(DynamicImage, bool), ValidationError> {
    match operation {
        Operation::Extend => Ok((extend(image)?, true)),
        Operation::Trim { margin } => trim(image, margin),
    }
}

/// Apply every operation of `chain` in order.
///
/// With `skip_if_identical`, a result pixel-identical to the input reports
/// `modified = false` even when individual steps changed the image along the
/// way (e.g. `t,e,t`). The first failing step aborts the chain.
pub fn apply(
    image: DynamicImage,
    chain: &OperationChain,
    skip_if_identical: bool,
) -> Result<(DynamicImage, bool), ValidationError> {
    let original = skip_if_identical.then(|| image.clone());

    let mut current = image;
    let mut modified = false;
    for &operation in chain.operations() {
        let (next, changed) = apply_operation(current, operation)?;
        log::debug!(
            "{operation}: {}x{} (changed: {changed})",
            next.width(),
            next.height()
        );
        current = next;
        modified |= changed;
    }

    if modified && original.is_some_and(|orig| images_identical(&orig, &current)) {
        log::debug!("chain {chain} produced an image identical to its input");
        modified = false;
    }
    Ok((current, modified))
}
