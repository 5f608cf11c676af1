//! RPMI request helpers.
//!
//! Thin wrappers that build the transfer descriptor for a channel, reserve a
//! sequence number and track the message through its lifecycle. Only
//! [`normal_request_with_status`] looks at the status word of a reply.

use alloc::vec;

use common::rpmi::payload::StatusResp;
use common::rpmi::{
    MessageHeader, MessageState, MessageType, RpmiMessageArgs, RpmiPayload, RpmiResponse,
    Transaction,
};

use crate::mailbox::{Channel, MailboxError, MboxXfer, check_status};

fn transact(
    chan: &Channel,
    args: RpmiMessageArgs,
    tx: &[u8],
    rx: &mut [u8],
) -> Result<usize, MailboxError> {
    let seq = chan.next_sequence()?;
    let mut xfer = MboxXfer::new(args, tx, rx).with_sequence(seq);
    let mut txn = Transaction::new(args.msg_type, xfer.token());

    if let Err(err) = chan.transfer(&mut xfer) {
        let state = txn.fail();
        log::debug!(
            "rpmi: service {:#x} token={:#06x} {:?}: {:?}",
            args.service_id,
            txn.token(),
            state,
            err
        );
        return Err(err);
    }

    if txn.dispatched(true) == MessageState::PostedComplete || !xfer.args.receives() {
        return Ok(0);
    }

    let ack = MessageHeader::new(
        chan.args()[0] as u16,
        args.service_id,
        MessageType::Acknowledgement,
        xfer.args.rx_data_len as u16,
        xfer.args.rx_token,
    );
    if txn.acknowledge(&ack) != MessageState::Acknowledged && args.checks_token() {
        let state = txn.fail();
        log::warn!(
            "rpmi: service {:#x} ack token={:#06x} does not match {:#06x}, {:?}",
            args.service_id,
            ack.token,
            txn.token(),
            state
        );
        return Err(MailboxError::Failed);
    }

    Ok(xfer.rx_len)
}

/// Issue a normal request with a raw body.
///
/// Returns the number of reply bytes written to `rx`. The reply is not
/// interpreted.
pub fn normal_request(
    chan: &Channel,
    service_id: u8,
    tx: &[u8],
    rx: &mut [u8],
) -> Result<usize, MailboxError> {
    transact(chan, RpmiMessageArgs::normal(service_id), tx, rx)
}

/// Issue a normal request and decode its reply, failing on a non-zero status.
pub fn normal_request_with_status<Req, Resp>(
    chan: &Channel,
    service_id: u8,
    req: &Req,
) -> Result<Resp, MailboxError>
where
    Req: RpmiPayload,
    Resp: RpmiResponse,
{
    let mut tx = vec![0u8; Req::SIZE];
    let tx_len = req.encode(&mut tx)?;
    let mut rx = vec![0u8; chan.max_xfer_len().max(Resp::SIZE)];

    let rx_len = normal_request(chan, service_id, &tx[..tx_len], &mut rx)?;
    let reply = &rx[..rx_len];

    // Error replies may carry the status word alone
    check_status(StatusResp::decode(reply)?.status)?;
    Ok(Resp::decode(reply)?)
}

/// Issue a posted request. Completes once the request is queued.
pub fn posted_request<Req: RpmiPayload>(
    chan: &Channel,
    service_id: u8,
    req: &Req,
) -> Result<(), MailboxError> {
    let mut tx = vec![0u8; Req::SIZE];
    let tx_len = req.encode(&mut tx)?;
    let mut rx = [0u8; 0];

    transact(chan, RpmiMessageArgs::posted(service_id), &tx[..tx_len], &mut rx)?;
    Ok(())
}
