mod plugin;

use plugin::NrqlPlugin;

#[grafana_plugin_sdk::main(
    services(data),
    init_subscriber = true,
)]
async fn plugin() -> NrqlPlugin {
    NrqlPlugin::new()
}
