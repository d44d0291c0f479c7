//! Secure guard device.
//!
//! Start-up order: buzzer off, OLED, BLE, MPU-6050.  A missing display
//! or motion sensor halts the board.  Afterwards the main loop runs one
//! tick at a time: sample, apply BLE events, draw, notify, sound alarms.

#![no_std]
#![no_main]

use ble_guard::ble::{server, softdevice_task};
use ble_guard::buzzer::Buzzer;
use ble_guard::config::{GUARD_DEVICE_NAME, GUARD_TICK_MS, MPU6050_I2C_ADDRESS};
use ble_guard::error::{halt, Error};
use ble_guard::guard::sample::SensorSample;
use ble_guard::guard::GuardState;
use ble_guard::sensor::mpu6050::Mpu6050;
use ble_guard::ui::display;
use ble_guard::ui::status::status_lines;
use defmt::{info, unwrap, warn};
use embassy_executor::Spawner;
use embassy_futures::yield_now;
use embassy_nrf::interrupt::{self, InterruptExt, Priority};
use embassy_nrf::pwm::SimplePwm;
use embassy_nrf::twim::{self, Twim};
use embassy_nrf::{bind_interrupts, peripherals};
use embassy_time::{Duration, Timer};
use nrf_softdevice::{raw, Softdevice};
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

bind_interrupts!(struct Irqs {
    SPIM0_SPIS0_TWIM0_TWIS0_SPI0_TWI0 => twim::InterruptHandler<peripherals::TWISPI0>;
    SPIM1_SPIS1_TWIM1_TWIS1_SPI1_TWI1 => twim::InterruptHandler<peripherals::TWISPI1>;
});

static SERVER: StaticCell<server::Server> = StaticCell::new();

fn softdevice_config() -> nrf_softdevice::Config {
    nrf_softdevice::Config {
        clock: Some(raw::nrf_clock_lf_cfg_t {
            source: raw::NRF_CLOCK_LF_SRC_RC as u8,
            rc_ctiv: 16,
            rc_temp_ctiv: 2,
            accuracy: raw::NRF_CLOCK_LF_ACCURACY_500_PPM as u8,
        }),
        conn_gap: Some(raw::ble_gap_conn_cfg_t {
            conn_count: 1,
            event_length: 24,
        }),
        conn_gatt: Some(raw::ble_gatt_conn_cfg_t { att_mtu: 23 }),
        gatts_attr_tab_size: Some(raw::ble_gatts_cfg_attr_tab_size_t {
            attr_tab_size: raw::BLE_GATTS_ATTR_TAB_SIZE_DEFAULT,
        }),
        gap_role_count: Some(raw::ble_gap_cfg_role_count_t {
            adv_set_count: 1,
            periph_role_count: 1,
            central_role_count: 0,
            central_sec_count: 0,
            _bitfield_1: raw::ble_gap_cfg_role_count_t::new_bitfield_1(0),
        }),
        gap_device_name: Some(raw::ble_gap_cfg_device_name_t {
            p_value: GUARD_DEVICE_NAME.as_ptr() as _,
            current_len: GUARD_DEVICE_NAME.len() as u16,
            max_len: GUARD_DEVICE_NAME.len() as u16,
            write_perm: unsafe { core::mem::zeroed() },
            _bitfield_1: raw::ble_gap_cfg_device_name_t::new_bitfield_1(
                raw::BLE_GATTS_VLOC_STACK as u8,
            ),
        }),
        ..Default::default()
    }
}

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Secure guard starting");

    // Priorities 0, 1 and 4 belong to the SoftDevice.
    let mut config = embassy_nrf::config::Config::default();
    config.gpiote_interrupt_priority = Priority::P2;
    config.time_interrupt_priority = Priority::P2;
    let p = embassy_nrf::init(config);
    interrupt::SPIM0_SPIS0_TWIM0_TWIS0_SPI0_TWI0.set_priority(Priority::P3);
    interrupt::SPIM1_SPIS1_TWIM1_TWIS1_SPI1_TWI1.set_priority(Priority::P3);

    let mut buzzer = Buzzer::new(SimplePwm::new_1ch(p.PWM0, p.P0_03));

    // OLED
    let display_bus = Twim::new(p.TWISPI0, Irqs, p.P0_26, p.P0_27, twim::Config::default());
    let mut display = match display::init(display_bus).await {
        Ok(display) => display,
        Err(e) => halt(e),
    };

    // BLE
    let sd = Softdevice::enable(&softdevice_config());
    let server = match server::register(sd) {
        Ok(server) => SERVER.init(server),
        Err(e) => halt(Error::from(e)),
    };
    let sd: &'static Softdevice = sd;
    unwrap!(spawner.spawn(softdevice_task(sd)));
    unwrap!(spawner.spawn(server::ble_task(sd, server)));

    // Motion sensor
    let motion_bus = Twim::new(p.TWISPI1, Irqs, p.P0_30, p.P0_31, twim::Config::default());
    let mut mpu = Mpu6050::new(motion_bus, MPU6050_I2C_ADDRESS);
    if let Err(e) = mpu.init() {
        halt(Error::from(e));
    }
    info!("MPU6050 found!");

    let events = server::events();
    let mut state = GuardState::new();

    loop {
        let sample = match mpu.read() {
            Ok(reading) => SensorSample::from(reading),
            Err(e) => {
                warn!("MPU6050 read failed: {}", e);
                *state.sample()
            }
        };

        let plan = state.tick(sample, core::iter::from_fn(|| events.try_receive().ok()));

        display::draw_status(&mut display, &status_lines(&state));

        if let Some(frame) = plan.frame {
            server::publish(frame.encode());
            // Let the BLE task send it before the buzzer holds the loop.
            yield_now().await;
        }

        // Each pulse blocks the loop for its full duration.
        for cause in plan.alarms {
            buzzer.pulse(cause).await;
        }

        Timer::after(Duration::from_millis(GUARD_TICK_MS)).await;
    }
}
