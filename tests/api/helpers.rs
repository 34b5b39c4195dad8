use std::net::{Ipv4Addr, SocketAddr, TcpListener};

use person_registry::configuration::get_static_configuration;
use person_registry::get_database_connection;
use person_registry::store::PersonStore;

pub async fn spawn_app() -> String {
    let test_address = SocketAddr::from((Ipv4Addr::LOCALHOST, 0));
    let test_listener = TcpListener::bind(test_address).expect("failed to bind random port");
    let local_address = test_listener.local_addr().unwrap();
    let store = get_test_database()
        .await
        .expect("failed to open the person store");

    let test_server = person_registry::run(test_listener, store)
        .expect("failed to run the server");

    tokio::spawn(test_server);
    format!("http://{}", local_address)
}

/// Same configuration as the binary, but every test gets a fresh in-memory store.
pub async fn get_test_database() -> Result<PersonStore, person_registry::store::Error> {
    let mut test_config = get_static_configuration().expect("failed to load configs");
    test_config.database.path = String::from(":memory:");

    get_database_connection(test_config.database).await
}
