// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! End-to-end leftover resolution tests.

use crate::tests::helpers::{create_course, seed_enrollments, setup};
use crate::{
    ApiError, CourseLockRegistry, ResolveLeftoverRequest, create_batches_for_course,
    resolve_leftover_batch,
};
use cohort_domain::BatchType;
use cohort_persistence::Persistence;

fn leave_request(batch_id: i64) -> ResolveLeftoverRequest {
    ResolveLeftoverRequest {
        batch_id,
        action: String::from("leave"),
        target_batch_id: None,
    }
}

fn merge_request(batch_id: i64, target_batch_id: i64) -> ResolveLeftoverRequest {
    ResolveLeftoverRequest {
        batch_id,
        action: String::from("merge"),
        target_batch_id: Some(target_batch_id),
    }
}

/// Builds a course with one confirmed batch of `target_size` students and
/// one flagged leftover of `source_size`. Returns
/// `(course_id, target_batch_id, source_batch_id)`.
fn setup_target_and_leftover(
    persistence: &mut Persistence,
    locks: &CourseLockRegistry,
    target_size: i64,
    source_size: i64,
) -> (i64, i64, i64) {
    let course_id = create_course(persistence, true, false);

    seed_enrollments(persistence, course_id, target_size, BatchType::Regular);
    let first = create_batches_for_course(persistence, locks, course_id).unwrap();
    let target = first.leftover_batches[0].batch_id;
    resolve_leftover_batch(persistence, locks, &leave_request(target)).unwrap();

    seed_enrollments(persistence, course_id, source_size, BatchType::Regular);
    // The creation path allocates the whole active roster; wipe and rebuild
    // would renumber, so allocate only the new wave through the writer
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

    (course_id, target, source)
}

#[test]
fn test_leave_clears_the_flag_and_keeps_the_batch() {
    let (mut persistence, locks) = setup();
    let course_id = create_course(&mut persistence, true, false);
    seed_enrollments(&mut persistence, course_id, 57, BatchType::Regular);
    let response = create_batches_for_course(&mut persistence, &locks, course_id).unwrap();
    let leftover = response.leftover_batches[0].batch_id;

    let resolved =
        resolve_leftover_batch(&mut persistence, &locks, &leave_request(leftover)).unwrap();
    assert_eq!(resolved.batch_id, leftover);
    assert_eq!(resolved.action, "leave");
    assert!(resolved.merged_students.is_none());

    let batch = persistence.get_batch(leftover).unwrap();
    assert!(!batch.is_leftover_batch);
    assert_eq!(batch.current_students, 7);
}

#[test]
fn test_leave_twice_is_a_no_op_success() {
    let (mut persistence, locks) = setup();
    let course_id = create_course(&mut persistence, true, false);
    seed_enrollments(&mut persistence, course_id, 57, BatchType::Regular);
    let response = create_batches_for_course(&mut persistence, &locks, course_id).unwrap();
    let leftover = response.leftover_batches[0].batch_id;

    resolve_leftover_batch(&mut persistence, &locks, &leave_request(leftover)).unwrap();
    let second =
        resolve_leftover_batch(&mut persistence, &locks, &leave_request(leftover)).unwrap();

    assert_eq!(second.batch_id, leftover);
    assert!(second.message.contains("already confirmed"));
    assert!(!persistence.get_batch(leftover).unwrap().is_leftover_batch);
}

#[test]
fn test_merge_at_capacity_boundary_is_rejected() {
    let (mut persistence, locks) = setup();
    // Target 20 of 25; source 7: 27 > 25 must fail with no state change
    let (_course_id, target, source) =
        setup_target_and_leftover(&mut persistence, &locks, 20, 7);

    let result = resolve_leftover_batch(&mut persistence, &locks, &merge_request(source, target));
    assert!(matches!(
        result,
        Err(ApiError::DomainRuleViolation { ref rule, .. }) if rule == "merge_capacity"
    ));

    assert_eq!(persistence.get_batch(target).unwrap().current_students, 20);
    let source_batch = persistence.get_batch(source).unwrap();
    assert_eq!(source_batch.current_students, 7);
    assert!(source_batch.is_leftover_batch);
}

#[test]
fn test_merge_with_room_transfers_and_deletes_source() {
    let (mut persistence, locks) = setup();
    // Target 15 of 25; source 7: merge succeeds at 22
    let (course_id, target, source) = setup_target_and_leftover(&mut persistence, &locks, 15, 7);
    let source_member_ids: Vec<i64> = persistence
        .list_enrollments_for_batch(source)
        .unwrap()
        .iter()
        .map(|enrollment| enrollment.enrollment_id.unwrap())
        .collect();

    let resolved =
        resolve_leftover_batch(&mut persistence, &locks, &merge_request(source, target)).unwrap();

    assert_eq!(resolved.merged_students, Some(7));
    let target_info = resolved.target_batch.unwrap();
    assert_eq!(target_info.batch_id, target);
    assert_eq!(target_info.current_students, 22);

    // Source no longer resolves
    assert!(matches!(
        resolve_leftover_batch(&mut persistence, &locks, &leave_request(source)),
        Err(ApiError::ResourceNotFound { .. })
    ));
    // Numbering continues from the highest surviving number
    assert_eq!(
        persistence
            .next_batch_number(course_id, BatchType::Regular)
            .unwrap(),
        2
    );

    for enrollment_id in source_member_ids {
        let enrollment = persistence.get_enrollment(enrollment_id).unwrap();
        assert_eq!(enrollment.batch_id, Some(target));
    }
}

#[test]
fn test_merge_filling_target_exactly_succeeds() {
    let (mut persistence, locks) = setup();
    let (_course_id, target, source) =
        setup_target_and_leftover(&mut persistence, &locks, 18, 7);

    let resolved =
        resolve_leftover_batch(&mut persistence, &locks, &merge_request(source, target)).unwrap();
    assert_eq!(resolved.target_batch.unwrap().current_students, 25);
}

#[test]
fn test_merge_without_target_is_invalid_input() {
    let (mut persistence, locks) = setup();
    let course_id = create_course(&mut persistence, true, false);
    seed_enrollments(&mut persistence, course_id, 7, BatchType::Regular);
    let response = create_batches_for_course(&mut persistence, &locks, course_id).unwrap();
    let leftover = response.leftover_batches[0].batch_id;

    let request = ResolveLeftoverRequest {
        batch_id: leftover,
        action: String::from("merge"),
        target_batch_id: None,
    };
    let result = resolve_leftover_batch(&mut persistence, &locks, &request);
    assert!(matches!(
        result,
        Err(ApiError::InvalidInput { ref field, .. }) if field == "target_batch_id"
    ));
}

#[test]
fn test_unknown_action_is_invalid_input() {
    let (mut persistence, locks) = setup();
    let course_id = create_course(&mut persistence, true, false);
    seed_enrollments(&mut persistence, course_id, 7, BatchType::Regular);
    let response = create_batches_for_course(&mut persistence, &locks, course_id).unwrap();
    let leftover = response.leftover_batches[0].batch_id;

    let request = ResolveLeftoverRequest {
        batch_id: leftover,
        action: String::from("split"),
        target_batch_id: None,
    };
    let result = resolve_leftover_batch(&mut persistence, &locks, &request);
    assert!(matches!(
        result,
        Err(ApiError::InvalidInput { ref field, .. }) if field == "action"
    ));
}

#[test]
fn test_merge_on_non_leftover_batch_is_rejected() {
    let (mut persistence, locks) = setup();
    let course_id = create_course(&mut persistence, true, false);
    seed_enrollments(&mut persistence, course_id, 50, BatchType::Regular);
    let response = create_batches_for_course(&mut persistence, &locks, course_id).unwrap();
    let (first, second) = (
        response.batches[0].batch_id,
        response.batches[1].batch_id,
    );

    let result = resolve_leftover_batch(&mut persistence, &locks, &merge_request(first, second));
    assert!(matches!(
        result,
        Err(ApiError::DomainRuleViolation { ref rule, .. }) if rule == "leftover_state"
    ));
}

#[test]
fn test_merge_into_missing_target_is_not_found() {
    let (mut persistence, locks) = setup();
    let course_id = create_course(&mut persistence, true, false);
    seed_enrollments(&mut persistence, course_id, 7, BatchType::Regular);
    let response = create_batches_for_course(&mut persistence, &locks, course_id).unwrap();
    let leftover = response.leftover_batches[0].batch_id;

    let result =
        resolve_leftover_batch(&mut persistence, &locks, &merge_request(leftover, 4040));
    assert!(matches!(
        result,
        Err(ApiError::ResourceNotFound { ref resource_type, .. }) if resource_type == "Target batch"
    ));
}

#[test]
fn test_merge_across_courses_is_rejected() {
    let (mut persistence, locks) = setup();
    let (_course_a, _target_a, source_a) =
        setup_target_and_leftover(&mut persistence, &locks, 15, 7);

    let course_b = create_course(&mut persistence, true, false);
    seed_enrollments(&mut persistence, course_b, 7, BatchType::Regular);
    let response_b = create_batches_for_course(&mut persistence, &locks, course_b).unwrap();
    let target_b = response_b.leftover_batches[0].batch_id;

    let result =
        resolve_leftover_batch(&mut persistence, &locks, &merge_request(source_a, target_b));
    assert!(matches!(
        result,
        Err(ApiError::DomainRuleViolation { ref rule, .. }) if rule == "merge_scope"
    ));
}

#[test]
fn test_resolving_unknown_batch_is_not_found() {
    let (mut persistence, locks) = setup();

    let result = resolve_leftover_batch(&mut persistence, &locks, &leave_request(404));
    assert!(matches!(
        result,
        Err(ApiError::ResourceNotFound { ref resource_type, .. }) if resource_type == "Batch"
    ));
}
