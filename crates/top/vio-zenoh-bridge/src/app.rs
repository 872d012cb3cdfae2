//! Application lifecycle management.

use std::sync::Arc;

use vio_bridge::handlers::image::ImageHandler;
use vio_bridge::handlers::odometry::OdometryHandler;
use vio_bridge::Bridge;
use vio_bus::ZenohSession;
use vio_subscriber::SubscriptionManager;

use crate::cli::{BridgeOdometryArgs, Cli, Command, ViewImageArgs, ZenohArgs};

/// Run the bridge application.
pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = build_zenoh_config(&cli.zenoh)?;
    let session = Arc::new(ZenohSession::connect(config).await?);

    match cli.command {
        Command::ViewImage(args) => run_view_image(session, args).await,
        Command::BridgeOdometry(args) => run_bridge_odometry(session, args).await,
    }
}

/// Build the Zenoh configuration from the CLI flags.
fn build_zenoh_config(args: &ZenohArgs) -> anyhow::Result<zenoh::Config> {
    let mut config = if let Some(config_path) = &args.zenoh_config {
        zenoh::Config::from_file(config_path)
            .map_err(|e| anyhow::anyhow!("Failed to load Zenoh config from {config_path}: {e}"))?
    } else {
        zenoh::Config::default()
    };

    if let Some(endpoint) = &args.zenoh_connect {
        config
            .insert_json5("connect/endpoints", &format!("[\"{endpoint}\"]"))
            .map_err(|e| anyhow::anyhow!("Failed to set Zenoh connect endpoint: {e}"))?;
    }

    if let Some(endpoint) = &args.zenoh_listen {
        config
            .insert_json5("listen/endpoints", &format!("[\"{endpoint}\"]"))
            .map_err(|e| anyhow::anyhow!("Failed to set Zenoh listen endpoint: {e}"))?;
    }

    config
        .insert_json5("mode", &format!("\"{}\"", args.zenoh_mode))
        .map_err(|e| anyhow::anyhow!("Failed to set Zenoh mode: {e}"))?;

    Ok(config)
}

async fn run_view_image(session: Arc<ZenohSession>, args: ViewImageArgs) -> anyhow::Result<()> {
    let builder = rerun::RecordingStreamBuilder::new("vio-zenoh-bridge");
    let rec = if let Some(path) = &args.recording {
        tracing::info!("Recording to {path}");
        builder
            .save(path)
            .map_err(|e| anyhow::anyhow!("Failed to open recording {path}: {e}"))?
    } else {
        println!("Spawning Rerun viewer…");
        builder
            .spawn()
            .map_err(|e| anyhow::anyhow!("Failed to spawn Rerun viewer: {e}"))?
    };

    let mut bridge = Bridge::new();
    let mut sub_manager = SubscriptionManager::new(Arc::clone(&session));

    for topic in &args.topic {
        bridge.add_topic(
            topic,
            Box::new(ImageHandler::new(rec.clone(), &args.entity_prefix, topic)),
        );
        sub_manager.subscribe(topic)?;
    }

    println!(
        "Subscribed to {} camera topics. Streaming to Rerun…",
        args.topic.len()
    );

    drive(bridge, sub_manager).await
}

async fn run_bridge_odometry(
    session: Arc<ZenohSession>,
    args: BridgeOdometryArgs,
) -> anyhow::Result<()> {
    let ros_topic_out = format!(
        "/{}{}",
        args.ros_tf_prefix,
        args.ros_topic_out
    );

    tracing::info!(
        "Bridge subscribing to {} and publishing {} with tf prefix {}",
        args.topic_in,
        ros_topic_out,
        args.ros_tf_prefix
    );

    let handler = OdometryHandler::declare(
        &session,
        args.domain_id,
        &ros_topic_out,
        &args.ros_tf_prefix,
        !args.no_tf_publisher,
        &args.node_name,
    )
    .await?;

    let mut bridge = Bridge::new();
    bridge.add_topic(&args.topic_in, Box::new(handler));

    let mut sub_manager = SubscriptionManager::new(Arc::clone(&session));
    sub_manager.subscribe(&args.topic_in)?;

    drive(bridge, sub_manager).await
}

/// Drain the message channel until Ctrl-C.
async fn drive(mut bridge: Bridge, mut sub_manager: SubscriptionManager) -> anyhow::Result<()> {
    let mut rx = sub_manager
        .take_message_receiver()
        .ok_or_else(|| anyhow::anyhow!("Message receiver already taken"))?;

    println!("Press Ctrl+C to stop.\n");

    let mut msg_count: u64 = 0;
    let start_time = std::time::Instant::now();

    loop {
        tokio::select! {
            Some(msg) = rx.recv() => {
                if let Err(e) = bridge.process_message(&msg) {
                    tracing::warn!(
                        "Failed to process message on {}: {e}",
                        msg.topic_name
                    );
                }
                msg_count += 1;

                // Periodic status
                if msg_count % 1000 == 0 {
                    let elapsed = start_time.elapsed().as_secs_f64();
                    let rate = msg_count as f64 / elapsed;
                    tracing::info!("Processed {msg_count} messages ({rate:.0} msgs/sec)");
                }
            }
            _ = tokio::signal::ctrl_c() => {
                println!("\nShutting down...");
                break;
            }
        }
    }

    sub_manager.unsubscribe_all();
    let elapsed = start_time.elapsed().as_secs_f64();
    println!(
        "Processed {msg_count} messages in {elapsed:.1}s ({:.0} msgs/sec)",
        msg_count as f64 / elapsed
    );

    Ok(())
}
