// IP address endpoints

use tracing::debug;

use crate::client::SendGridClient;
use crate::error::Error;
use crate::models::IpAddress;

pub const ROUTE_IP_ADDRESSES: &str = "v3/ips";

impl SendGridClient {
    /// List the IP addresses owned by the parent account, in provider order.
    ///
    /// `GET /v3/ips`
    pub async fn list_ip_addresses(&self) -> Result<Vec<IpAddress>, Error> {
        let url = self.url(ROUTE_IP_ADDRESSES)?;
        debug!("listing ip addresses");
        self.get(url, &[], None).await
    }
}
