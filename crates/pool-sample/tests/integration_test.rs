use actor_pool::{PoolConfig, Pooler};
use pool_sample::connection_pool::ConnectionError;
use pool_sample::lifecycle::ConnectionSystem;
use pool_sample::model::{ConnectionId, ConnectionSettings};
use std::collections::HashSet;
use std::time::Duration;

fn settings(max: usize) -> ConnectionSettings {
    ConnectionSettings {
        endpoint: "db.test:5432".to_string(),
        pool: PoolConfig::default().with_max(max),
        ..ConnectionSettings::default()
    }
}

/// Full end-to-end test with the real pool actor.
#[tokio::test]
async fn test_full_connection_system_integration() {
    let system = ConnectionSystem::new(&settings(2));

    let row = system
        .client
        .run_query("SELECT 1")
        .await
        .expect("Failed to run query");
    assert_eq!(row, "conn_1 #1: SELECT 1");

    // The same connection is reused rather than a new one opened.
    let row = system
        .client
        .run_query("SELECT 2")
        .await
        .expect("Failed to run query");
    assert_eq!(row, "conn_1 #2: SELECT 2");

    let stats = system.client.stats().await.unwrap();
    assert_eq!(stats.created, 1);
    assert_eq!(stats.idle, 1);

    system.shutdown().await.expect("Failed to shutdown system");
}

/// More concurrent queries than connections: all succeed, sharing at most `max`.
#[tokio::test]
async fn test_concurrent_queries_share_connections() {
    let system = ConnectionSystem::new(&settings(3));

    let mut handles = vec![];
    for i in 0..20 {
        let client = system.client.clone();
        handles.push(tokio::spawn(async move {
            client.run_query(&format!("SELECT {i}")).await
        }));
    }

    let mut used = HashSet::new();
    for handle in handles {
        let row = handle.await.unwrap().expect("Query failed");
        used.insert(row.split(' ').next().unwrap().to_string());
    }
    assert!(used.len() <= 3, "opened too many connections: {used:?}");

    let stats = system.client.stats().await.unwrap();
    assert!(stats.created <= 3);
    assert_eq!(stats.idle, stats.created);
    assert_eq!(stats.waiting, 0);

    system.shutdown().await.unwrap();
}

/// A failed connect is retried by the next borrower; the first one waits for a return.
#[tokio::test(start_paused = true)]
async fn test_failed_connect_is_not_fatal() {
    let settings = ConnectionSettings {
        failing_attempts: 1,
        ..settings(0)
    };
    let system = ConnectionSystem::new(&settings);
    system.client.set_wait(Duration::from_millis(50)).await.unwrap();

    let first = system.client.get().await;
    assert_eq!(first.unwrap_err(), ConnectionError::Timeout);

    let conn = system.client.get().await.unwrap();
    assert_eq!(conn.id, ConnectionId(1));
    system.client.put(conn).await.unwrap();

    assert_eq!(system.client.stats().await.unwrap().created, 1);
    system.shutdown().await.unwrap();
}

/// With the pool capped and every connection out, borrowers time out.
#[tokio::test(start_paused = true)]
async fn test_exhausted_pool_times_out() {
    let system = ConnectionSystem::new(&settings(1));
    system.client.set_wait(Duration::from_millis(30)).await.unwrap();

    let held = system.client.get().await.unwrap();
    let result = system.client.run_query("SELECT 1").await;
    assert_eq!(result, Err(ConnectionError::Timeout));

    system.client.resize(2).await.unwrap();
    let row = system.client.run_query("SELECT 2").await.unwrap();
    assert_eq!(row, "conn_2 #1: SELECT 2");

    system.client.put(held).await.unwrap();
    system.shutdown().await.unwrap();
}
