use core::ffi::CStr;

use embassy_net::{
    dns::{DnsQueryType, Error as DNSError},
    tcp::{ConnectError, TcpSocket},
    Stack,
};
use embassy_time::Duration;
use esp_mbedtls::{asynch::Session, Certificates, Mode, TlsError, TlsReference, TlsVersion};

use crate::constants::SOCKET_TIMEOUT_SECS;

pub type TlsSession<'a> = Session<'a, TcpSocket<'a>>;

#[derive(Debug)]
pub enum Error {
    #[allow(dead_code)]
    DNSQueryFailed(DNSError),
    DNSLookupFailed,
    #[allow(dead_code)]
    SocketConnectionError(ConnectError),
    #[allow(dead_code)]
    TLSSessionFailed(TlsError),
    #[allow(dead_code)]
    TLSHandshakeFailed(TlsError),
}

/// Resolve `hostname`, connect a TCP socket and run the mutual TLS handshake.
#[allow(clippy::too_many_arguments)]
pub async fn connect<'a>(
    stack: Stack<'static>,
    tls: TlsReference<'a>,
    rx_buffer: &'a mut [u8],
    tx_buffer: &'a mut [u8],
    hostname: &str,
    servername: &'a CStr,
    port: u16,
    certificates: Certificates<'a>,
) -> Result<TlsSession<'a>, Error> {
    let mut socket = TcpSocket::new(stack, rx_buffer, tx_buffer);
    socket.set_timeout(Some(Duration::from_secs(SOCKET_TIMEOUT_SECS)));

    let addr = stack
        .dns_query(hostname, DnsQueryType::A)
        .await
        .map_err(Error::DNSQueryFailed)?
        .first()
        .copied()
        .ok_or(Error::DNSLookupFailed)?;

    log::info!("Connecting TCP socket to {}:{}", hostname, port);
    socket
        .connect((addr, port))
        .await
        .map_err(Error::SocketConnectionError)?;
    log::debug!("TCP connected");

    let mut session = Session::new(
        socket,
        Mode::Client { servername },
        TlsVersion::Tls1_2,
        certificates,
        tls,
    )
    .map_err(Error::TLSSessionFailed)?;

    log::info!("Starting TLS handshake with {}", hostname);
    session.connect().await.map_err(|e| {
        log::error!("TLS handshake failed: {:?}", e);
        Error::TLSHandshakeFailed(e)
    })?;
    log::info!("TLS handshake complete");

    Ok(session)
}
