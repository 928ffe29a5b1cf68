//! Default IPAM driver state: the local and global address spaces and the
//! predefined pools automatic allocation draws from.

use crate::address_space::AddressSpace;
use crate::config::IpamConfig;
use crate::error::{IpamError, Result};
use crate::event::EventEmitter;
use crate::pool_id::PoolId;
use ipnet::IpNet;

/// Address spaces of the default driver.
#[derive(Debug)]
pub struct Ipam {
    config: IpamConfig,
    local: AddressSpace,
    global: AddressSpace,
}

impl Ipam {
    pub fn new(config: IpamConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            local: AddressSpace::new(config.local_space.clone()),
            global: AddressSpace::new(config.global_space.clone()),
            config,
        })
    }

    /// Create the driver with both address spaces reporting to `emitter`.
    pub fn with_events(config: IpamConfig, emitter: EventEmitter) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            local: AddressSpace::with_events(config.local_space.clone(), emitter.clone()),
            global: AddressSpace::with_events(config.global_space.clone(), emitter),
            config,
        })
    }

    pub fn config(&self) -> &IpamConfig {
        &self.config
    }

    /// Names of the local and global address spaces.
    pub fn default_address_spaces(&self) -> (&str, &str) {
        (self.local.name(), self.global.name())
    }

    /// Look up an address space by name.
    pub fn address_space(&self, name: &str) -> Result<&AddressSpace> {
        if name == self.local.name() {
            Ok(&self.local)
        } else if name == self.global.name() {
            Ok(&self.global)
        } else {
            Err(IpamError::ConfigError(format!(
                "unknown address space: {}",
                name
            )))
        }
    }

    /// Register an explicit pool, or a free predefined one when `subnet` is
    /// `None`.
    pub fn request_pool(
        &self,
        space: &str,
        subnet: Option<IpNet>,
        reserved: &[IpNet],
    ) -> Result<PoolId> {
        let space = self.address_space(space)?;
        match subnet {
            Some(subnet) => space.request_pool(subnet, false),
            None => space.allocate_predefined(&self.config.predefined, reserved),
        }
    }

    /// Carve `child` from `subnet`, registering `subnet` implicitly (with
    /// auto-release) when it is not a pool yet.
    pub fn request_child(&self, space: &str, subnet: IpNet, child: IpNet) -> Result<PoolId> {
        let space = self.address_space(space)?;
        space.allocate_child(&PoolId::new(space.name(), subnet), child)
    }

    /// Release a pool or child subnet given its persisted identifier.
    pub fn release_pool(&self, pool_id: &str) -> Result<()> {
        let id: PoolId = pool_id.parse()?;
        self.address_space(&id.address_space)?.release_pool(&id)
    }
}
