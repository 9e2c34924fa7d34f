use std::sync::{Arc, Mutex};

use tracing::span::{Attributes, Id};
use tracing::Subscriber;
use tracing_subscriber::layer::{Context, SubscriberExt};
use tracing_subscriber::{Layer, Registry};

use aafl_backend::models::tournament::{PlayMatchRequest, Round};
use aafl_backend::services::PlayMode;

mod common;
use common::utils::{register_bracket, seeded_rng, tournament_service};

/// Records the name of every span opened while installed
#[derive(Clone, Default)]
struct SpanNames(Arc<Mutex<Vec<&'static str>>>);

impl SpanNames {
    fn taken(&self) -> Vec<&'static str> {
        std::mem::take(&mut *self.0.lock().unwrap())
    }
}

impl<S: Subscriber> Layer<S> for SpanNames {
    fn on_new_span(&self, attrs: &Attributes<'_>, _id: &Id, _ctx: Context<'_, S>) {
        self.0.lock().unwrap().push(attrs.metadata().name());
    }
}

#[tokio::test]
async fn write_operations_leave_spans_to_the_handlers() {
    let names = SpanNames::default();
    let _guard = tracing::subscriber::set_default(Registry::default().with(names.clone()));

    let service = tournament_service();
    let mut rng = seeded_rng(5);
    let teams = register_bracket(&service).await;
    let extra = service.register_team("Ninth", Some("Ghana")).await.unwrap();
    service
        .simulate_league_fixture(teams[0].id, teams[1].id, &mut rng)
        .await
        .unwrap();
    service.delete_team(extra.id).await.unwrap();
    service.restart().await.unwrap();

    let opened = names.taken();
    for handler_span in [
        "Register team",
        "Simulate league fixture",
        "Delete team",
        "Restart tournament",
    ] {
        assert!(!opened.contains(&handler_span), "service opened {:?}", handler_span);
    }

    // Knockout play keeps its own service span
    let request = PlayMatchRequest {
        team_a_id: teams[0].id,
        team_b_id: teams[1].id,
        round: Some(Round::Quarterfinal),
    };
    service.play_match(&request, PlayMode::Quick, &mut rng).await.unwrap();
    assert!(names.taken().contains(&"Play knockout match"));
}
