//! BLE GATT server - the guard service.
//!
//! Exposes one custom service with two characteristics:
//!
//! - **sensor** (0x180D, read + notify): latest 12-byte `SensorFrame`.
//! - **command** (0x180C, read + write): "Lock" / "Unlock" text.
//!
//! The BLE task never touches guard state.  It posts `GuardEvent`s into
//! `EVENTS` (connect, disconnect, command written) and forwards frames
//! the main loop `publish`es to the connected central.

use crate::config::{
    COMMAND_INITIAL_VALUE, EVENT_QUEUE_DEPTH, GUARD_DEVICE_NAME, GUARD_SERVICE_UUID_LE,
};
use crate::error::BleError;
use crate::guard::frame::SENSOR_FRAME_SIZE;
use crate::guard::{CommandValue, GuardEvent};
use defmt::{debug, info, warn};
use embassy_futures::select::select;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::{Channel, Receiver};
use embassy_sync::signal::Signal;
use embassy_time::{Duration, Timer};
use nrf_softdevice::ble::advertisement_builder::{
    Flag, LegacyAdvertisementBuilder, LegacyAdvertisementPayload, ServiceList,
};
use nrf_softdevice::ble::{gatt_server, peripheral, Connection};
use nrf_softdevice::Softdevice;

/// BLE → main loop events, drained once per tick.
static EVENTS: Channel<CriticalSectionRawMutex, GuardEvent, EVENT_QUEUE_DEPTH> = Channel::new();

/// Latest frame waiting to be notified; a newer frame replaces an unsent one.
static FRAMES: Signal<CriticalSectionRawMutex, [u8; SENSOR_FRAME_SIZE]> = Signal::new();

/// Guard service (128-bit UUID `6e400001-b5a3-f393-e0a9-e50e224dcca9`).
#[nrf_softdevice::gatt_service(uuid = "6e400001-b5a3-f393-e0a9-e50e224dcca9")]
pub struct GuardService {
    /// Sensor frame - notified every tick while connected.
    #[characteristic(uuid = "180d", read, notify)]
    pub sensor: [u8; SENSOR_FRAME_SIZE],

    /// Command text written by the central.
    #[characteristic(uuid = "180c", read, write)]
    pub command: CommandValue,
}

#[nrf_softdevice::gatt_server]
pub struct Server {
    pub guard: GuardService,
}

static ADV_DATA: LegacyAdvertisementPayload = LegacyAdvertisementBuilder::new()
    .flags(&[Flag::GeneralDiscovery, Flag::LE_Only])
    .full_name(GUARD_DEVICE_NAME)
    .build();

// The 128-bit UUID does not fit next to the name; it goes in the scan response.
static SCAN_DATA: LegacyAdvertisementPayload = LegacyAdvertisementBuilder::new()
    .services_128(ServiceList::Complete, &[GUARD_SERVICE_UUID_LE])
    .build();

/// Register the GATT server and give the command characteristic its
/// initial value.
pub fn register(sd: &mut Softdevice) -> Result<Server, BleError> {
    let server = Server::new(sd).map_err(|_| BleError::ServerFailed)?;

    let initial = CommandValue::from_slice(COMMAND_INITIAL_VALUE).unwrap_or_default();
    if server.guard.command_set(&initial).is_err() {
        warn!("Could not set initial command value");
    }

    Ok(server)
}

/// Receiving end of the event queue, for the main loop.
pub fn events() -> Receiver<'static, CriticalSectionRawMutex, GuardEvent, EVENT_QUEUE_DEPTH> {
    EVENTS.receiver()
}

/// Hand a frame to the BLE task for notification.  Never blocks.
pub fn publish(frame: [u8; SENSOR_FRAME_SIZE]) {
    FRAMES.signal(frame);
}

async fn advertise(sd: &Softdevice) -> Result<Connection, BleError> {
    let adv = peripheral::ConnectableAdvertisement::ScannableUndirected {
        adv_data: &ADV_DATA,
        scan_data: &SCAN_DATA,
    };
    peripheral::advertise_connectable(sd, adv, &peripheral::Config::default())
        .await
        .map_err(|_| BleError::AdvertiseFailed)
}

/// Forward published frames to `conn` until the future is dropped.
async fn notify_frames(server: &Server, conn: &Connection) {
    loop {
        let frame = FRAMES.wait().await;
        if server.guard.sensor_set(&frame).is_err() {
            warn!("Could not update sensor value");
        }
        // Refused until the central enables notifications; nothing to retry.
        if server.guard.sensor_notify(conn, &frame).is_err() {
            debug!("Sensor notify skipped");
        }
    }
}

/// Advertise, serve one central until it leaves, repeat.
#[embassy_executor::task]
pub async fn ble_task(sd: &'static Softdevice, server: &'static Server) -> ! {
    loop {
        info!("Advertising as {=str}", GUARD_DEVICE_NAME);
        let conn = match advertise(sd).await {
            Ok(conn) => conn,
            Err(e) => {
                warn!("BLE: {}", e);
                Timer::after(Duration::from_secs(1)).await;
                continue;
            }
        };

        info!("Central connected");
        FRAMES.reset();
        EVENTS.send(GuardEvent::Connected).await;

        let gatt = gatt_server::run(&conn, server, |event| match event {
            ServerEvent::Guard(GuardServiceEvent::CommandWrite(value)) => {
                debug!("Command written: {=[u8]}", value.as_slice());
                if EVENTS.try_send(GuardEvent::CommandWritten(value)).is_err() {
                    warn!("Event queue full - dropping command");
                }
            }
            ServerEvent::Guard(GuardServiceEvent::SensorCccdWrite { notifications }) => {
                info!("Sensor notifications: {}", notifications);
            }
        });

        select(gatt, notify_frames(server, &conn)).await;

        info!("Central disconnected");
        EVENTS.send(GuardEvent::Disconnected).await;
    }
}
