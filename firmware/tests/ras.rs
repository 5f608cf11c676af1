//! RAS cold init, calls and teardown through the subsystem context.

use std::sync::Arc;
use std::sync::Mutex;

use common::rpmi::payload::{ListResponse, RasProbeResp, RasSyncHartErrReq};
use common::rpmi::service::ras;
use common::rpmi::{MessageType, RpmiPayload, ServiceGroup};
use drivers::hal::mailbox::MailboxController;
use drivers::mailbox::{ChanArgs, Channel, ChannelInfo, MailboxError, MboxXfer};
use firmware::binding::Binding;
use firmware::{ConsumerDesc, Firmware, SbiError, StaticBindings};

const RAS_GROUP: u32 = ServiceGroup::Ras.id() as u32;
const RAS_CONSUMER: ConsumerDesc<'static> = ConsumerDesc::new("rpmi-ras", 0);

/// Answers RAS requests the way the platform microcontroller would.
#[derive(Default)]
struct RasPlatform {
    probe_status: i32,
    created: Mutex<Vec<ChanArgs>>,
    destroyed: Mutex<Vec<ChanArgs>>,
    harts: Mutex<Vec<u32>>,
}

impl RasPlatform {
    fn reply(&self, xfer: &mut MboxXfer<'_>, body: &impl RpmiPayload) -> Result<(), MailboxError> {
        let len = body.encode(&mut xfer.rx[..])?;
        xfer.rx_len = len;
        xfer.args.rx_data_len = len;
        xfer.args.rx_token = xfer.token();
        Ok(())
    }
}

impl MailboxController for RasPlatform {
    fn name(&self) -> &str {
        "ras-platform"
    }

    fn create_channel(&self, args: &ChanArgs) -> Result<ChannelInfo, MailboxError> {
        if args[0] != RAS_GROUP {
            return Err(MailboxError::NotSupported);
        }
        self.created.lock().unwrap().push(*args);
        Ok(ChannelInfo { max_xfer_len: 56 })
    }

    fn destroy_channel(&self, chan: &Channel) {
        self.destroyed.lock().unwrap().push(*chan.args());
    }

    fn exchange(&self, _chan: &Channel, xfer: &mut MboxXfer<'_>) -> Result<(), MailboxError> {
        assert_eq!(xfer.args.msg_type, MessageType::NormalRequest);

        match xfer.args.service_id {
            ras::PROBE => {
                let resp = RasProbeResp {
                    status: self.probe_status,
                    version: 0x0001_0000,
                };
                self.reply(xfer, &resp)
            }
            ras::SYNC_HART_ERR => {
                let req = RasSyncHartErrReq::decode(xfer.tx)?;
                self.harts.lock().unwrap().push(req.hart_id);
                let resp = ListResponse::from_items(&[0x10 + req.hart_id, 0x20], 0)?;
                self.reply(xfer, &resp)
            }
            _ => Err(MailboxError::Timeout),
        }
    }
}

fn hart_three() -> u32 {
    3
}

fn bindings(controller: u32, group: u32) -> StaticBindings {
    StaticBindings::new().with(Binding {
        consumer: "rpmi-ras",
        index: 0,
        controller,
        args: [group, 0],
    })
}

fn boot(platform: RasPlatform) -> (Firmware, Arc<RasPlatform>) {
    let fw = Firmware::new();
    let platform = Arc::new(platform);
    fw.registry().add(1, platform.clone()).unwrap();
    (fw, platform)
}

#[test]
fn cold_init_registers_the_agent() {
    let (fw, platform) = boot(RasPlatform::default());

    fw.ras_cold_init(&bindings(1, RAS_GROUP), &RAS_CONSUMER, hart_three);

    let agent = fw.ras().agent().unwrap();
    assert_eq!(agent.name(), "rpmi-ras-agent");
    assert_eq!(*platform.created.lock().unwrap(), [[RAS_GROUP, 0]]);
    assert_eq!(fw.ras().probe(), Ok(()));
}

#[test]
fn hart_errors_are_synced_for_the_calling_hart() {
    let (fw, platform) = boot(RasPlatform::default());
    fw.ras_cold_init(&bindings(1, RAS_GROUP), &RAS_CONSUMER, hart_three);

    let mut pending = [0u32; 8];
    assert_eq!(fw.ras().sync_hart_errs(&mut pending), Ok(2));
    assert_eq!(pending[..2], [0x13, 0x20]);
    assert_eq!(*platform.harts.lock().unwrap(), [3]);

    // Only as many vectors as fit are returned
    let mut pending = [0u32; 1];
    assert_eq!(fw.ras().sync_hart_errs(&mut pending), Ok(1));
    assert_eq!(pending, [0x13]);
}

#[test]
fn device_errors_are_a_noop() {
    let (fw, _) = boot(RasPlatform::default());
    fw.ras_cold_init(&bindings(1, RAS_GROUP), &RAS_CONSUMER, hart_three);

    let mut pending = [0xFFu32; 4];
    assert_eq!(fw.ras().sync_dev_errs(&mut pending), Ok(0));
    assert_eq!(pending, [0xFF; 4]);
}

#[test]
fn platform_status_surfaces_as_sbi_error() {
    let (fw, _) = boot(RasPlatform {
        probe_status: -2,
        ..RasPlatform::default()
    });
    fw.ras_cold_init(&bindings(1, RAS_GROUP), &RAS_CONSUMER, hart_three);

    assert_eq!(fw.ras().probe(), Err(SbiError::NotSupported));
}

#[test]
fn missing_binding_leaves_ras_unavailable() {
    let (fw, platform) = boot(RasPlatform::default());

    fw.ras_cold_init(&StaticBindings::new(), &RAS_CONSUMER, hart_three);

    assert!(fw.ras().agent().is_none());
    assert_eq!(fw.ras().probe(), Err(SbiError::Failed));
    assert!(platform.created.lock().unwrap().is_empty());
}

#[test]
fn refused_channel_leaves_ras_unavailable() {
    let (fw, _) = boot(RasPlatform::default());

    // Wrong service group: the backend refuses the channel
    fw.ras_cold_init(&bindings(1, 4), &RAS_CONSUMER, hart_three);
    assert!(fw.ras().agent().is_none());

    // Unknown controller id
    fw.ras_cold_init(&bindings(9, RAS_GROUP), &RAS_CONSUMER, hart_three);
    assert!(fw.ras().agent().is_none());
}

#[test]
fn repeated_cold_init_keeps_one_agent_and_channel() {
    let (fw, platform) = boot(RasPlatform::default());
    let bindings = bindings(1, RAS_GROUP);

    fw.ras_cold_init(&bindings, &RAS_CONSUMER, hart_three);
    let first = fw.ras().agent().unwrap();
    fw.ras_cold_init(&bindings, &RAS_CONSUMER, hart_three);

    assert!(Arc::ptr_eq(&first, &fw.ras().agent().unwrap()));
    assert_eq!(platform.created.lock().unwrap().len(), 1);
}

#[test]
fn teardown_releases_everything() {
    let (fw, platform) = boot(RasPlatform::default());
    fw.ras_cold_init(&bindings(1, RAS_GROUP), &RAS_CONSUMER, hart_three);

    fw.teardown();

    assert!(fw.ras().agent().is_none());
    assert!(fw.registry().is_empty());
    assert_eq!(*platform.destroyed.lock().unwrap(), [[RAS_GROUP, 0]]);
    assert_eq!(fw.ras().probe(), Err(SbiError::Failed));

    // The context can be brought up again
    fw.registry().add(1, platform.clone()).unwrap();
    fw.ras_cold_init(&bindings(1, RAS_GROUP), &RAS_CONSUMER, hart_three);
    assert_eq!(fw.ras().probe(), Ok(()));
}
