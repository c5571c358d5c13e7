//! Chaos property tests for the in-memory story store
//!
//! Random creation sequences run through `ChaoticStoryApi`. Whatever fails,
//! the store must stay consistent:
//! - Only successful creations are persisted (no partial writes)
//! - Every `prev` edge has a matching `next` back-link and vice versa
//! - No story lists itself as a neighbor
//! - Filtered fetches return each known story once and skip unknown ids

use std::collections::HashSet;

use proptest::prelude::*;
use storymap_client::{ChaoticStoryApi, MemoryStoryApi, RequestError, StoryApi};
use storymap_core::{AuthorId, CreateContext, Story, StoryDraft, StoryId, StoryType};

/// One step of a generated session: start a new narrative, or continue the
/// n-th created story (modulo how many exist).
#[derive(Debug, Clone)]
enum Step {
    Root,
    Continue(usize),
}

fn step_strategy() -> impl Strategy<Value = Step> {
    prop_oneof![1 => Just(Step::Root), 3 => any::<usize>().prop_map(Step::Continue)]
}

fn runtime() -> tokio::runtime::Runtime {
    tokio::runtime::Builder::new_current_thread().build().expect("runtime")
}

fn draft_for(step: &Step, created: &[StoryId]) -> StoryDraft {
    let context = match step {
        Step::Continue(n) if !created.is_empty() => {
            CreateContext::continuing(created[n % created.len()].clone(), "room".into())
        },
        _ => CreateContext::root("room".into()),
    };
    StoryDraft::compose("t", "<p>body</p>", &context, AuthorId::new("a1")).expect("valid context")
}

/// Verify edge symmetry across every stored story
fn verify_links(store: &MemoryStoryApi, ids: &[StoryId]) {
    for id in ids {
        let story = store.get(id).expect("created story is stored");
        assert!(!story.has_self_loop(), "self loop on {id}");

        for prev in &story.prev {
            let pred = store.get(prev).expect("predecessor exists");
            assert!(pred.precedes(id), "{prev} missing next link to {id}");
        }
        for next in &story.next {
            let succ = store.get(next).expect("successor exists");
            assert!(succ.follows(id), "{next} missing prev link to {id}");
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_chaos_never_corrupts_links(
        steps in prop::collection::vec(step_strategy(), 1..40),
        failure_rate in 0.0f64..0.6,
        seed in any::<u64>(),
    ) {
        let api = ChaoticStoryApi::with_seed(MemoryStoryApi::new(), failure_rate, seed);
        let rt = runtime();

        let mut created: Vec<StoryId> = Vec::new();
        for step in &steps {
            let draft = draft_for(step, &created);
            match rt.block_on(api.create_story(draft.clone())) {
                Ok(story) => {
                    prop_assert_eq!(&story.prev, &draft.prev);
                    created.push(story.id);
                },
                Err(err) => {
                    prop_assert_eq!(err, RequestError::Transport("injected failure".into()));
                },
            }
        }

        prop_assert_eq!(api.inner().len(), created.len());
        prop_assert_eq!(api.request_count(), steps.len());
        verify_links(api.inner(), &created);
    }

    #[test]
    fn prop_filtered_fetch_dedupes_and_skips_unknown(
        picks in prop::collection::vec(0usize..8, 0..20),
        ghosts in prop::collection::vec("[a-z]{3}", 0..4),
    ) {
        let store = MemoryStoryApi::new();
        let rt = runtime();

        let mut created = Vec::new();
        for i in 0..8 {
            let step = if i == 0 { Step::Root } else { Step::Continue(i - 1) };
            let story = rt.block_on(store.create_story(draft_for(&step, &created))).expect("create");
            created.push(story.id);
        }

        let mut ids: Vec<StoryId> = picks.iter().map(|&i| created[i].clone()).collect();
        ids.extend(ghosts.iter().map(|g| StoryId::new(format!("ghost-{g}"))));

        let found = rt.block_on(store.fetch_filtered_stories(ids.clone())).expect("fetch");

        let expected: HashSet<_> = picks.iter().map(|&i| created[i].clone()).collect();
        let returned: Vec<_> = found.iter().map(|s| s.id.clone()).collect();
        let unique: HashSet<_> = returned.iter().cloned().collect();

        prop_assert_eq!(returned.len(), unique.len());
        prop_assert_eq!(unique, expected);
    }
}

#[tokio::test]
async fn empty_fetch_does_not_reach_store() {
    let store = MemoryStoryApi::new();

    let found = store.fetch_filtered_stories(Vec::new()).await.expect("fetch");

    assert!(found.is_empty());
    assert_eq!(store.round_trips(), 0);
}

#[tokio::test]
async fn continuation_appears_in_room_listing() {
    let store = MemoryStoryApi::new();
    let root = store
        .create_story(draft_for(&Step::Root, &[]))
        .await
        .expect("create root");
    let child = store
        .create_story(draft_for(&Step::Continue(0), &[root.id.clone()]))
        .await
        .expect("create child");

    let room: Vec<Story> = store.fetch_theme_room_stories("room".into()).await.expect("room");

    assert_eq!(room.len(), 2);
    assert_eq!(room[0].story_type, StoryType::Root);
    assert_eq!(room[0].next, vec![child.id.clone()]);
    assert_eq!(room[1].prev, vec![root.id]);
}
