use crate::{
    interpolate::interpolate,
    keyframe::{Keyframe, Snapshot},
    FauxPassError, Result,
};

/// Samples a keyframe sequence at `time_ms`.
///
/// The sequence must be sorted by timestamp (see [`validate_order`]). Before
/// the first keyframe and after the last one the boundary keyframe is returned
/// unchanged, so an animation holds its first and final pose. An empty
/// sequence yields a snapshot with every attribute absent.
pub fn sample(keyframes: &[Keyframe], time_ms: u64) -> Snapshot {
    let (first, last) = match (keyframes.first(), keyframes.last()) {
        (Some(first), Some(last)) => (first, last),
        _ => return Keyframe::at(time_ms),
    };

    if time_ms <= first.time_ms {
        return first.clone();
    }
    if time_ms >= last.time_ms {
        return last.clone();
    }

    // Index of the first keyframe strictly after `time_ms`; its predecessor is
    // the last keyframe at or before it.
    let next = keyframes.partition_point(|kf| kf.time_ms <= time_ms);
    interpolate(&keyframes[next - 1], &keyframes[next], time_ms)
}

/// Checks that timestamps never decrease along the sequence.
pub fn validate_order(node: &str, keyframes: &[Keyframe]) -> Result<()> {
    match keyframes
        .windows(2)
        .find(|pair| pair[1].time_ms < pair[0].time_ms)
    {
        Some(pair) => Err(FauxPassError::UnsortedKeyframes {
            node: node.to_string(),
            previous_ms: pair[0].time_ms,
            time_ms: pair[1].time_ms,
        }),
        None => Ok(()),
    }
}

/// Timestamp of the final keyframe, if there is one.
pub fn last_timestamp(keyframes: &[Keyframe]) -> Option<u64> {
    keyframes.last().map(|kf| kf.time_ms)
}
