// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Leftover confirmation, merge, and recalculation-deletion tests.

use crate::PersistenceError;
use crate::tests::{allocate_type, seed_enrollments, setup_persistence_with_course};
use cohort_domain::BatchType;

/// Seeds 32 regular students and allocates them: one full batch of 25 and
/// one leftover of 7. Returns `(full_batch_id, leftover_batch_id)`.
fn setup_full_and_leftover(
    persistence: &mut crate::Persistence,
    course_id: i64,
) -> (i64, i64) {
    seed_enrollments(persistence, course_id, 32, BatchType::Regular);
    let batch_ids = allocate_type(persistence, course_id, BatchType::Regular);
    assert_eq!(batch_ids.len(), 2);
    (batch_ids[0], batch_ids[1])
}

#[test]
fn test_confirm_clears_the_leftover_flag() {
    let (mut persistence, course_id) = setup_persistence_with_course();
    let (_full, leftover) = setup_full_and_leftover(&mut persistence, course_id);

    persistence.confirm_leftover(leftover).unwrap();

    let batch = persistence.get_batch(leftover).unwrap();
    assert!(!batch.is_leftover_batch);
    assert_eq!(batch.current_students, 7);
}

#[test]
fn test_confirm_unknown_batch_is_not_found() {
    let (mut persistence, _course_id) = setup_persistence_with_course();
    assert_eq!(
        persistence.confirm_leftover(404),
        Err(PersistenceError::BatchNotFound(404))
    );
}

#[test]
fn test_merge_filling_target_to_exact_capacity_succeeds() {
    let (mut persistence, course_id) = setup_persistence_with_course();

    // 18 students first: one confirmed batch with exactly 7 free seats
    seed_enrollments(&mut persistence, course_id, 18, BatchType::Regular);
    let target = allocate_type(&mut persistence, course_id, BatchType::Regular)[0];
    persistence.confirm_leftover(target).unwrap();

    seed_enrollments(&mut persistence, course_id, 7, BatchType::Regular);
    let course = persistence.get_course(course_id).unwrap();
    let roster = persistence
        .list_active_enrollments(course_id, BatchType::Regular)
        .unwrap();
    let unassigned: Vec<_> = roster
        .into_iter()
        .filter(|enrollment| enrollment.batch_id.is_none())
        .collect();
    let next = persistence
        .next_batch_number(course_id, BatchType::Regular)
        .unwrap();
    let plan =
        cohort::plan_batch_allocation(&course, BatchType::Regular, &unassigned, next).unwrap();
    let source = persistence.apply_allocation(&plan).unwrap()[0];

    persistence.merge_leftover(source, target, 7).unwrap();

    let target_batch = persistence.get_batch(target).unwrap();
    assert_eq!(target_batch.current_students, 25);
    assert!(target_batch.is_full());
}

#[test]
fn test_merge_happy_path() {
    let (mut persistence, course_id) = setup_persistence_with_course();

    // 15 students first: one confirmed standalone batch with room for 10
    seed_enrollments(&mut persistence, course_id, 15, BatchType::Regular);
    let target = allocate_type(&mut persistence, course_id, BatchType::Regular)[0];
    persistence.confirm_leftover(target).unwrap();

    // 7 more students: a second, leftover batch
    seed_enrollments(&mut persistence, course_id, 7, BatchType::Regular);
    let course = persistence.get_course(course_id).unwrap();
    let roster = persistence
        .list_active_enrollments(course_id, BatchType::Regular)
        .unwrap();
    let unassigned: Vec<_> = roster
        .into_iter()
        .filter(|enrollment| enrollment.batch_id.is_none())
        .collect();
    assert_eq!(unassigned.len(), 7);
    let next = persistence
        .next_batch_number(course_id, BatchType::Regular)
        .unwrap();
    let plan =
        cohort::plan_batch_allocation(&course, BatchType::Regular, &unassigned, next).unwrap();
    let source = persistence.apply_allocation(&plan).unwrap()[0];
    let source_member_ids: Vec<i64> = persistence
        .list_enrollments_for_batch(source)
        .unwrap()
        .iter()
        .map(|enrollment| enrollment.enrollment_id.unwrap())
        .collect();
    assert_eq!(source_member_ids.len(), 7);

    persistence.merge_leftover(source, target, 7).unwrap();

    // Target grew from 15 to 22
    let target_batch = persistence.get_batch(target).unwrap();
    assert_eq!(target_batch.current_students, 22);

    // Source batch no longer resolves
    assert_eq!(
        persistence.get_batch(source),
        Err(PersistenceError::BatchNotFound(source))
    );

    // Every former source member now points at the target
    for enrollment_id in source_member_ids {
        let enrollment = persistence.get_enrollment(enrollment_id).unwrap();
        assert_eq!(enrollment.batch_id, Some(target));
    }
}

#[test]
fn test_merge_conflict_leaves_no_trace() {
    let (mut persistence, course_id) = setup_persistence_with_course();

    seed_enrollments(&mut persistence, course_id, 20, BatchType::Regular);
    let target = allocate_type(&mut persistence, course_id, BatchType::Regular)[0];
    persistence.confirm_leftover(target).unwrap();

    seed_enrollments(&mut persistence, course_id, 7, BatchType::Regular);
    let course = persistence.get_course(course_id).unwrap();
    let roster = persistence
        .list_active_enrollments(course_id, BatchType::Regular)
        .unwrap();
    let unassigned: Vec<_> = roster
        .into_iter()
        .filter(|enrollment| enrollment.batch_id.is_none())
        .collect();
    let next = persistence
        .next_batch_number(course_id, BatchType::Regular)
        .unwrap();
    let plan =
        cohort::plan_batch_allocation(&course, BatchType::Regular, &unassigned, next).unwrap();
    let source = persistence.apply_allocation(&plan).unwrap()[0];

    // 20 + 7 > 25: the conditional update refuses and nothing changes
    let result = persistence.merge_leftover(source, target, 7);
    assert_eq!(
        result,
        Err(PersistenceError::MergeConflict {
            target_batch_id: target
        })
    );

    assert_eq!(persistence.get_batch(target).unwrap().current_students, 20);
    let source_batch = persistence.get_batch(source).unwrap();
    assert_eq!(source_batch.current_students, 7);
    assert!(source_batch.is_leftover_batch);
    assert_eq!(
        persistence.list_enrollments_for_batch(source).unwrap().len(),
        7
    );
}

#[test]
fn test_delete_course_batches_unassigns_enrollments() {
    let (mut persistence, course_id) = setup_persistence_with_course();
    seed_enrollments(&mut persistence, course_id, 32, BatchType::Regular);
    allocate_type(&mut persistence, course_id, BatchType::Regular);
    allocate_type(&mut persistence, course_id, BatchType::Revision);

    let deleted = persistence.delete_course_batches(course_id).unwrap();
    assert_eq!(deleted, 3);

    assert!(
        persistence
            .list_batches_for_course(course_id)
            .unwrap()
            .is_empty()
    );
    let enrollments = persistence.list_enrollments_for_course(course_id).unwrap();
    assert_eq!(enrollments.len(), 32);
    assert!(
        enrollments
            .iter()
            .all(|enrollment| enrollment.batch_id.is_none())
    );
}

#[test]
fn test_delete_course_batches_is_scoped_to_the_course() {
    let (mut persistence, course_id) = setup_persistence_with_course();
    let other_course_id = persistence
        .create_course(&crate::tests::create_test_course())
        .unwrap();

    seed_enrollments(&mut persistence, course_id, 7, BatchType::Regular);
    seed_enrollments(&mut persistence, other_course_id, 7, BatchType::Regular);
    allocate_type(&mut persistence, course_id, BatchType::Regular);
    allocate_type(&mut persistence, other_course_id, BatchType::Regular);

    persistence.delete_course_batches(course_id).unwrap();

    assert!(
        persistence
            .list_batches_for_course(course_id)
            .unwrap()
            .is_empty()
    );
    assert_eq!(
        persistence
            .list_batches_for_course(other_course_id)
            .unwrap()
            .len(),
        1
    );
}
