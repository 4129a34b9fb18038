// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Transactional allocation application tests.

use crate::PersistenceError;
use crate::tests::{allocate_type, seed_enrollments, setup_persistence_with_course};
use cohort::AllocationPlan;
use cohort_domain::BatchType;

#[test]
fn test_apply_allocation_persists_batches_and_pointers() {
    let (mut persistence, course_id) = setup_persistence_with_course();
    let enrollment_ids = seed_enrollments(&mut persistence, course_id, 57, BatchType::Regular);

    let batch_ids = allocate_type(&mut persistence, course_id, BatchType::Regular);
    assert_eq!(batch_ids.len(), 3);

    // Every enrollment now points at one of the created batches
    for &enrollment_id in &enrollment_ids {
        let enrollment = persistence.get_enrollment(enrollment_id).unwrap();
        assert!(batch_ids.contains(&enrollment.batch_id.unwrap()));
    }

    // Membership counts match the stored occupancy
    for &batch_id in &batch_ids {
        let batch = persistence.get_batch(batch_id).unwrap();
        let members = persistence.list_enrollments_for_batch(batch_id).unwrap();
        assert_eq!(members.len(), usize::try_from(batch.current_students).unwrap());
    }
}

#[test]
fn test_enrollment_conservation_across_batches() {
    let (mut persistence, course_id) = setup_persistence_with_course();
    seed_enrollments(&mut persistence, course_id, 57, BatchType::Regular);
    allocate_type(&mut persistence, course_id, BatchType::Regular);

    let batches = persistence
        .list_batches_for_type(course_id, BatchType::Regular)
        .unwrap();
    let total: u32 = batches.iter().map(|batch| batch.current_students).sum();
    assert_eq!(total, 57);
}

#[test]
fn test_repeated_allocations_extend_numbering() {
    let (mut persistence, course_id) = setup_persistence_with_course();

    seed_enrollments(&mut persistence, course_id, 30, BatchType::Regular);
    allocate_type(&mut persistence, course_id, BatchType::Regular);

    // A later wave of enrollments gets fresh numbers, not collisions
    seed_enrollments(&mut persistence, course_id, 26, BatchType::Regular);
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
    persistence.apply_allocation(&plan).unwrap();

    let batches = persistence
        .list_batches_for_type(course_id, BatchType::Regular)
        .unwrap();
    let numbers: Vec<u32> = batches.iter().map(|batch| batch.batch_number).collect();
    assert_eq!(numbers, vec![1, 2, 3, 4]);
}

#[test]
fn test_duplicate_batch_number_is_rejected() {
    let (mut persistence, course_id) = setup_persistence_with_course();
    seed_enrollments(&mut persistence, course_id, 25, BatchType::Regular);

    let course = persistence.get_course(course_id).unwrap();
    let roster = persistence
        .list_active_enrollments(course_id, BatchType::Regular)
        .unwrap();

    // Two plans computed against the same snapshot race for number 1;
    // the storage-layer unique index rejects the loser
    let first: AllocationPlan =
        cohort::plan_batch_allocation(&course, BatchType::Regular, &roster, 1).unwrap();
    let second: AllocationPlan =
        cohort::plan_batch_allocation(&course, BatchType::Regular, &roster, 1).unwrap();

    persistence.apply_allocation(&first).unwrap();
    let result = persistence.apply_allocation(&second);
    assert!(matches!(
        result,
        Err(PersistenceError::DuplicateBatchNumber(_))
    ));

    // The losing plan left nothing behind
    let batches = persistence
        .list_batches_for_type(course_id, BatchType::Regular)
        .unwrap();
    assert_eq!(batches.len(), 1);
}

#[test]
fn test_failed_allocation_rolls_back_entirely() {
    let (mut persistence, course_id) = setup_persistence_with_course();
    seed_enrollments(&mut persistence, course_id, 7, BatchType::Regular);

    let course = persistence.get_course(course_id).unwrap();
    let roster = persistence
        .list_active_enrollments(course_id, BatchType::Regular)
        .unwrap();
    let mut plan: AllocationPlan =
        cohort::plan_batch_allocation(&course, BatchType::Regular, &roster, 1).unwrap();

    // Poison the plan with an enrollment that does not exist
    plan.batches[0].members.push(99_999);

    let result = persistence.apply_allocation(&plan);
    assert_eq!(result, Err(PersistenceError::EnrollmentNotFound(99_999)));

    // The batch insert inside the failed transaction was rolled back
    assert!(
        persistence
            .list_batches_for_type(course_id, BatchType::Regular)
            .unwrap()
            .is_empty()
    );
    // No enrollment pointer was left behind either
    let roster = persistence
        .list_active_enrollments(course_id, BatchType::Regular)
        .unwrap();
    assert!(roster.iter().all(|enrollment| enrollment.batch_id.is_none()));
}

#[test]
fn test_empty_roster_shell_batch_is_persisted() {
    let (mut persistence, course_id) = setup_persistence_with_course();

    let batch_ids = allocate_type(&mut persistence, course_id, BatchType::Revision);
    assert_eq!(batch_ids.len(), 1);

    let batch = persistence.get_batch(batch_ids[0]).unwrap();
    assert_eq!(batch.current_students, 0);
    assert!(!batch.is_leftover_batch);
    assert_eq!(batch.batch_number, 1);
}
