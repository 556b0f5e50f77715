use runlevel::{down, up};
use runlevel_sample::services::{demo_stack, ApiServer, CacheHandle, DbPool, ServiceError};
use runlevel_sample::settings::Settings;

#[tokio::test]
async fn full_stack_round_trip() {
    let settings = Settings::default();
    let systems = demo_stack();

    let plan = up(&systems);
    // Database and Cache share level 0; the API listener is alone on level 1.
    assert_eq!(plan.level_sizes(), vec![2, 1]);

    let state = plan.run(settings.clone()).await.unwrap();

    let pool = state.get::<DbPool>("db").unwrap();
    assert_eq!(pool.url, settings.database_url);
    assert_eq!(pool.connections, 8);

    let cache = state.get::<CacheHandle>("cache").unwrap();
    assert_eq!(cache.capacity, settings.cache_capacity);

    let api = state.get::<ApiServer>("api").unwrap();
    assert_eq!(api.addr, settings.listen_addr);

    // Tear down from the bring-up's final state.
    let final_state = down(&systems).run_seeded(settings, state).await.unwrap();
    // Stop hooks contribute nothing; the accumulator carries the seed through.
    assert!(final_state.contains("db"));
    assert!(final_state.contains("api"));
}

#[tokio::test]
async fn unreachable_database_aborts_the_bring_up() {
    let settings = Settings {
        database_url: String::new(),
        ..Settings::default()
    };
    let systems = demo_stack();

    let err = up(&systems).run(settings).await.unwrap_err();
    assert!(matches!(
        err.downcast_ref::<ServiceError>(),
        Some(ServiceError::DatabaseUnreachable(_))
    ));
}

#[tokio::test]
async fn api_listener_requires_its_dependencies() {
    use runlevel_sample::services::{service_spec, HttpApi};

    // A stack with only the API listener: level 1 starts with nothing in
    // the accumulator, so the dependency lookup fails.
    let systems = vec![service_spec(1, HttpApi)];

    let err = up(&systems).run(Settings::default()).await.unwrap_err();
    assert_eq!(
        err.downcast_ref::<ServiceError>(),
        Some(&ServiceError::MissingDependency("db"))
    );
}
