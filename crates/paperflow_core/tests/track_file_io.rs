use std::fs;

use paperflow_core::store::{format_tracks, parse_tracks};
use paperflow_core::{
    Action, Command, PaperState, PaperType, ReviewRegistry, StoreError, ANONYMOUS,
    PLACEHOLDER_AUTHOR_NAMES,
};

const SAMPLE: &str = "\
# Research Track,10,11
* 0,Submitted,Alice,Abstract,false,,
* 1,Reviewing,anonymous,FullPaper,false,rev1,
* 2,Closed,Carol,FullPaper,true,,Accepted
# Industry Track,8,20
* 4,Submitted,anonymous,Abstract,true,rev2,WeakAcceptRecommendation
";

fn exec(registry: &mut ReviewRegistry, id: u32, action: Action, payload: Option<&str>) {
    let command = Command::new(action, payload).unwrap();
    registry.execute_command(id, &command).unwrap();
}

#[test]
fn load_activates_first_track_and_synchronizes_ids() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tracks.txt");
    fs::write(&path, SAMPLE).unwrap();

    let mut registry = ReviewRegistry::new();
    assert_eq!(registry.load_tracks_from_file(&path).unwrap(), 2);
    assert_eq!(registry.active_track_name(), Some("Research Track"));
    assert_eq!(registry.track_names(), vec!["Research Track", "Industry Track"]);

    let track = registry.active_track().unwrap();
    assert_eq!(track.page_limit(), 10);
    assert_eq!(track.extra_pages_pay_rate(), 11);
    assert_eq!(track.len(), 3);

    assert_eq!(registry.add_paper_to_active_track("Dana").unwrap(), Some(3));
}

#[test]
fn restored_papers_keep_their_fields() {
    let tracks = parse_tracks(SAMPLE);
    assert_eq!(tracks.len(), 2);

    let reviewing = tracks[0].paper_by_id(1).unwrap();
    assert_eq!(reviewing.state(), PaperState::Reviewing);
    assert_eq!(reviewing.author_names(), ANONYMOUS);
    assert_eq!(reviewing.paper_type(), PaperType::FullPaper);
    assert_eq!(reviewing.reviewer(), Some("rev1"));
    assert_eq!(reviewing.saved_author_names(), Some(PLACEHOLDER_AUTHOR_NAMES));

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tracks.txt");
    fs::write(&path, SAMPLE).unwrap();
    let mut registry = ReviewRegistry::new();
    registry.load_tracks_from_file(&path).unwrap();

    registry.set_active_track("Industry Track").unwrap();
    exec(&mut registry, 4, Action::Close, Some("Withdrawn"));
    let withdrawn = registry.paper_by_id(4).unwrap();
    assert_eq!(withdrawn.author_names(), PLACEHOLDER_AUTHOR_NAMES);
    assert_eq!(withdrawn.state(), PaperState::Closed);
}

#[test]
fn save_then_load_round_trips_every_track() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tracks.txt");

    let mut registry = ReviewRegistry::new();
    registry.add_track("Research Track", 10, 11).unwrap();
    registry.add_paper_to_active_track("Alice").unwrap();
    registry.add_paper_to_active_track("Bob").unwrap();
    exec(&mut registry, 1, Action::Assign, Some("rev1"));
    exec(&mut registry, 1, Action::Recommend, Some("StrongAcceptRecommendation"));
    registry.add_track("Industry Track", 8, 20).unwrap();
    registry.add_paper_to_active_track("Carol").unwrap();
    exec(&mut registry, 0, Action::Close, Some("Duplicate"));

    registry.save_tracks_to_file(&path).unwrap();
    let saved = fs::read_to_string(&path).unwrap();
    assert_eq!(
        saved,
        "# Research Track,10,11\n\
         * 0,Submitted,Alice,Abstract,false,,\n\
         * 1,Submitted,anonymous,Abstract,true,rev1,StrongAcceptRecommendation\n\
         # Industry Track,8,20\n\
         * 0,Closed,Carol,Abstract,false,,Duplicate\n"
    );

    let mut reloaded = ReviewRegistry::new();
    reloaded.load_tracks_from_file(&path).unwrap();
    assert_eq!(format_tracks(reloaded.tracks()), saved);
}

#[test]
fn tracks_without_papers_are_not_persisted() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tracks.txt");

    let mut registry = ReviewRegistry::new();
    registry.add_track("Research Track", 10, 11).unwrap();
    registry.add_paper_to_active_track("Alice").unwrap();
    registry.add_track("Empty Track", 10, 11).unwrap();
    registry.save_tracks_to_file(&path).unwrap();

    let mut reloaded = ReviewRegistry::new();
    assert_eq!(reloaded.load_tracks_from_file(&path).unwrap(), 1);
    assert_eq!(reloaded.track_names(), vec!["Research Track"]);
}

#[test]
fn loading_skips_names_already_present() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tracks.txt");
    fs::write(&path, SAMPLE).unwrap();

    let mut registry = ReviewRegistry::new();
    registry.add_track("research track", 5, 5).unwrap();
    registry.add_paper_to_active_track("Zed").unwrap();

    assert_eq!(registry.load_tracks_from_file(&path).unwrap(), 1);
    assert_eq!(registry.track_names(), vec!["research track", "Industry Track"]);
    assert_eq!(registry.active_track_name(), Some("Industry Track"));
}

#[test]
fn missing_file_is_an_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.txt");

    let mut registry = ReviewRegistry::new();
    let err = registry.load_tracks_from_file(&path).unwrap_err();
    match err {
        StoreError::Io { path: failed, .. } => assert_eq!(failed, path),
        other => panic!("expected Io error, got {other:?}"),
    }
    assert!(registry.track_names().is_empty());
}

#[test]
fn file_without_track_header_loads_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tracks.txt");
    fs::write(&path, "Research Track,10,11\n* 0,Submitted,Alice,Abstract,false,,\n").unwrap();

    let mut registry = ReviewRegistry::new();
    assert_eq!(registry.load_tracks_from_file(&path).unwrap(), 0);
    assert_eq!(registry.active_track_name(), None);
}

#[test]
fn closed_papers_survive_reload_and_stay_closed() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tracks.txt");
    fs::write(&path, SAMPLE).unwrap();

    let mut registry = ReviewRegistry::new();
    registry.load_tracks_from_file(&path).unwrap();
    let closed = registry.paper_by_id(2).unwrap().clone();

    let submit = Command::new(Action::Submit, None).unwrap();
    assert!(registry.execute_command(2, &submit).is_err());
    assert_eq!(registry.paper_by_id(2).unwrap(), &closed);
}

#[test]
fn rejected_reviewer_id_never_reaches_the_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tracks.txt");

    let mut registry = ReviewRegistry::new();
    registry.add_track("Research Track", 10, 11).unwrap();
    registry.add_paper_to_active_track("Alice").unwrap();
    assert!(Command::new(Action::Assign, Some("Smith, J")).is_err());
    exec(&mut registry, 0, Action::Assign, Some(" Smith J "));
    registry.save_tracks_to_file(&path).unwrap();

    let mut reloaded = ReviewRegistry::new();
    reloaded.load_tracks_from_file(&path).unwrap();
    let paper = reloaded.paper_by_id(0).unwrap();
    assert_eq!(paper.state(), PaperState::Reviewing);
    assert_eq!(paper.reviewer(), Some("Smith J"));
}

#[test]
fn withdrawn_after_reload_keeps_placeholder_identity_on_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tracks.txt");
    fs::write(
        &path,
        "# Research Track,10,11\n\
         * 0,Reviewing,anonymous,FullPaper,false,rev1,\n\
         * 1,Revising,anonymous,FullPaper,false,,\n",
    )
    .unwrap();

    let mut registry = ReviewRegistry::new();
    registry.load_tracks_from_file(&path).unwrap();
    exec(&mut registry, 0, Action::Close, Some("Withdrawn"));
    exec(&mut registry, 1, Action::Close, Some("Withdrawn"));
    registry.save_tracks_to_file(&path).unwrap();

    let mut reloaded = ReviewRegistry::new();
    reloaded.load_tracks_from_file(&path).unwrap();
    for id in [0, 1] {
        let paper = reloaded.paper_by_id(id).unwrap();
        assert_eq!(paper.state(), PaperState::Closed);
        assert_eq!(paper.author_names(), PLACEHOLDER_AUTHOR_NAMES);
        assert_eq!(paper.reviewer(), None);
    }
}
