//! Integration tests for planning a day end to end.

use focushub_core::planner::{free_slots, FreeSlot};
use focushub_core::{CoreError, DayPlan, MemoryStore, PlannerError, Repository};

#[test]
fn test_plan_a_morning_and_persist_it() {
    let repo = Repository::new(MemoryStore::new());
    let mut plan = repo.load_plan().unwrap();

    let email = plan.add_backlog("Answer email", 30).unwrap().id.clone();
    let deep = plan.add_backlog("Write report", 90).unwrap().id.clone();
    let call = plan.add_backlog("Call the dentist", 15).unwrap().id.clone();

    plan.place(&email, 9, 0).unwrap();
    plan.place(&deep, 9, 30).unwrap();

    // 10:45 falls inside the report block.
    let err = plan.place(&call, 10, 45).unwrap_err();
    assert!(matches!(err, CoreError::Planner(PlannerError::Conflict { .. })));
    assert_eq!(plan.backlog().len(), 1);

    plan.place(&call, 11, 0).unwrap();
    assert!(plan.backlog().is_empty());
    assert_eq!(plan.total_scheduled_minutes(), 135);

    repo.save_plan(&plan).unwrap();
    let reloaded = repo.load_plan().unwrap();
    assert_eq!(reloaded, plan);

    let starts: Vec<_> = reloaded
        .timeline()
        .iter()
        .map(|t| t.interval.start_label())
        .collect();
    assert_eq!(starts, vec!["09:00", "09:30", "11:00"]);
}

#[test]
fn test_free_slots_between_placed_tasks() {
    let mut plan = DayPlan::new();
    let a = plan.add_backlog("a", 60).unwrap().id.clone();
    let b = plan.add_backlog("b", 60).unwrap().id.clone();
    plan.place(&a, 8, 0).unwrap();
    plan.place(&b, 9, 10).unwrap();

    let slots = plan.free_slots(15);
    assert_eq!(
        slots,
        vec![
            FreeSlot { start_minute_of_day: 0, end_minute_of_day: 480 },
            FreeSlot { start_minute_of_day: 610, end_minute_of_day: 1440 },
        ]
    );
    // The 10-minute gap shows up once the threshold allows it.
    assert_eq!(plan.free_slots(10).len(), 3);
}

#[test]
fn test_free_slots_of_empty_day() {
    let slots = free_slots(&[], 30);
    assert_eq!(slots.len(), 1);
    assert_eq!(slots[0].duration_minutes(), 1440);
}

#[test]
fn test_late_task_may_run_past_midnight() {
    let mut plan = DayPlan::new();
    let id = plan.add_backlog("Night shift notes", 120).unwrap().id.clone();
    let placed = plan.place(&id, 23, 30).unwrap();
    assert_eq!(placed.interval.end(), 1530);
}
