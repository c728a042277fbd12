use poem::listener::TcpListener;
use vc_relay::configuration::get_configuration;
use vc_relay::state::RelayState;
use vc_relay::telemetry::{get_subscriber, init_subscriber};

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();
    let subscriber = get_subscriber("vc-relay".into(), "info".into(), std::io::stdout);
    init_subscriber(subscriber);

    let configuration = get_configuration().expect("Failed to read configuration.");

    let state =
        RelayState::new(&configuration.upstream).expect("Failed to build upstream client.");
    tracing::info!("relaying to {}", state.upstream.base_url());

    let addr = configuration.application.address();
    tracing::info!("listening on {}", addr);
    let listener = TcpListener::bind(addr);

    let server = vc_relay::server(state, listener);

    if let Err(err) = server.await {
        tracing::error!("server error : {:?}", err);
    }
}
