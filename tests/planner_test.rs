use tunethatname::{
    contacts::NameSupplyPlanner,
    error::PlaylistError,
    types::{Contact, SearchName},
};

fn contact(id: i64, first_name: Option<&str>) -> Contact {
    Contact::new(id, first_name, Some("Tester"))
}

fn terms(names: &[SearchName]) -> Vec<&str> {
    names.iter().map(|n| n.term.as_str()).collect()
}

#[test]
fn test_plan_skips_contacts_without_first_name() {
    let contacts = vec![
        contact(1, None),
        contact(2, Some("Johnny")),
        contact(3, Some("   ")),
        contact(4, Some("")),
        contact(5, Some(" Billy ")),
    ];

    let queue = NameSupplyPlanner::plan(&contacts, 5).unwrap();

    assert_eq!(terms(queue.queued()), vec!["Johnny", "Billy"]);
    assert_eq!(queue.queued()[1].contact.as_ref().map(|c| c.id), Some(5));
}

#[test]
fn test_plan_takes_first_names_in_order() {
    let contacts = vec![
        contact(1, Some("Johnny")),
        contact(2, Some("Billy")),
        contact(3, Some("Frankie")),
        contact(4, Some("Susie")),
    ];

    let queue = NameSupplyPlanner::plan(&contacts, 2).unwrap();

    assert_eq!(terms(queue.queued()), vec!["Johnny", "Billy"]);
    assert_eq!(queue.pool().len(), 4);
}

#[test]
fn test_plan_queues_every_name_when_short() {
    let contacts = vec![contact(1, Some("Johnny")), contact(2, Some("Billy"))];

    let queue = NameSupplyPlanner::plan(&contacts, 10).unwrap();

    assert_eq!(terms(queue.queued()), vec!["Johnny", "Billy"]);
}

#[test]
fn test_plan_deduplicates_names_ignoring_case() {
    let contacts = vec![
        contact(1, Some("Johnny")),
        contact(2, Some("JOHNNY")),
        contact(3, Some("Billy")),
        contact(4, Some("johnny")),
    ];

    let queue = NameSupplyPlanner::plan(&contacts, 4).unwrap();

    assert_eq!(terms(queue.queued()), vec!["Johnny", "Billy"]);
    assert_eq!(queue.queued()[0].contact.as_ref().map(|c| c.id), Some(1));
}

#[test]
fn test_plan_without_eligible_contacts() {
    let contacts = vec![contact(1, None), contact(2, Some(" "))];

    assert!(matches!(
        NameSupplyPlanner::plan(&contacts, 3),
        Err(PlaylistError::NoContactsAvailable)
    ));
    assert!(matches!(
        NameSupplyPlanner::plan(&[], 3),
        Err(PlaylistError::NoContactsAvailable)
    ));
}

#[test]
fn test_plan_rejects_zero_songs() {
    let contacts = vec![contact(1, Some("Johnny"))];

    assert!(matches!(
        NameSupplyPlanner::plan(&contacts, 0),
        Err(PlaylistError::InvalidSize(0))
    ));
}

#[test]
fn test_supply_uses_reserve_then_cycles_pool() {
    let contacts = vec![
        contact(1, Some("Johnny")),
        contact(2, Some("Billy")),
        contact(3, Some("Frankie")),
    ];

    let queue = NameSupplyPlanner::plan(&contacts, 2).unwrap();
    let supply = queue.supply();
    assert_eq!(supply.pass_len(), 3);

    let drawn: Vec<SearchName> = supply.take(8).collect();
    assert_eq!(
        terms(&drawn),
        vec!["Frankie", "Johnny", "Billy", "Frankie", "Johnny", "Billy", "Frankie", "Johnny"]
    );
}

#[test]
fn test_supply_of_single_name_never_runs_dry() {
    let queue = NameSupplyPlanner::plan(&[contact(1, Some("Susie"))], 5).unwrap();

    assert_eq!(queue.supply().pass_len(), 1);
    assert!(queue.supply().take(10).all(|name| name.term == "Susie"));
}

#[test]
fn test_plan_names_from_free_text() {
    let queue = NameSupplyPlanner::plan_names(&["Alice", "  ", "bob", "Bob"], 3).unwrap();

    assert_eq!(terms(queue.queued()), vec!["Alice", "bob"]);
    assert!(queue.queued().iter().all(|n| n.contact.is_none()));
}
