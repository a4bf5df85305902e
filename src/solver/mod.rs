pub mod contact;

use crate::objects::rigid_body::RigidBody;

/// Borrows two distinct bodies of a slice mutably at once.
///
/// # Panics
///
/// Panics if the indices are equal or out of bounds. Manifolds are only ever built for
/// `i < j` pairs of the current body list, so either would be a bookkeeping bug.
pub(crate) fn get_mutable_body_pair(
    bodies: &mut [RigidBody],
    idx_a: usize,
    idx_b: usize,
) -> (&mut RigidBody, &mut RigidBody) {
    assert_ne!(idx_a, idx_b, "a contact cannot pair a body with itself");

    // Ensure a < b for split_at_mut
    if idx_a < idx_b {
        let (slice_a, slice_b) = bodies.split_at_mut(idx_b);
        (&mut slice_a[idx_a], &mut slice_b[0])
    } else {
        let (slice_b, slice_a) = bodies.split_at_mut(idx_a);
        (&mut slice_a[0], &mut slice_b[idx_b])
    }
}
