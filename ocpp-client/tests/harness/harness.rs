use std::sync::{Arc, Once};

use log::LevelFilter;
use ocppx_client::{CallDispatcher, Transport};
use ocppx_core::ChargeBoxId;

use super::{
    event::{event_bus, EventRx},
    listener::RecordingListener,
};

static INIT: Once = Once::new();

pub fn init_logger() {
    INIT.call_once(|| {
        env_logger::builder()
            .is_test(true)
            .filter_level(LevelFilter::Trace)
            .try_init()
            .ok();
    });
}

pub fn cbid(id: &str) -> ChargeBoxId {
    ChargeBoxId::parse(id).unwrap()
}

pub struct DispatcherHarness<T: Transport> {
    pub dispatcher: CallDispatcher<T>,
    pub transport: Arc<T>,
    pub listener: Arc<RecordingListener>,
    pub bus_rx: EventRx,
}

impl<T: Transport> DispatcherHarness<T> {
    pub fn new(charge_box_id: &str, transport: T) -> Self {
        init_logger();
        let (tx, rx) = event_bus(2000);
        let listener = Arc::new(RecordingListener::new(tx));
        let transport = Arc::new(transport);
        let dispatcher = CallDispatcher::with_shared_transport(cbid(charge_box_id), transport.clone())
            .with_listener(listener.clone());
        Self {
            dispatcher,
            transport,
            listener,
            bus_rx: rx,
        }
    }
}
