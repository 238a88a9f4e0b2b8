//! Boot image identifiers.
//!
//! The provider publishes a fixed set of public images. They are exposed here
//! as named constants and as a label table so the CLI can accept either a
//! numeric identifier or a readable label.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use thiserror::Error;

/// Numeric boot image identifier as sent in `imageRef`.
///
/// Zero is representable so an unset image can be detected during validation.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ImageRef(u32);

impl ImageRef {
    /// Ubuntu Lucid 10.04 kernel.
    pub const UBUNTU_LUCID_10_04_KERNEL: Self = Self(1235);
    /// Ubuntu Lucid 10.04 server.
    pub const UBUNTU_LUCID_10_04: Self = Self(1236);
    /// Ubuntu Maverick 10.10 kernel.
    pub const UBUNTU_MAVERICK_10_10_KERNEL: Self = Self(1237);
    /// Ubuntu Maverick 10.10 server.
    pub const UBUNTU_MAVERICK_10_10: Self = Self(1238);
    /// Ubuntu Natty 11.04 kernel.
    pub const UBUNTU_NATTY_11_04_KERNEL: Self = Self(1239);
    /// Ubuntu Natty 11.04 server.
    pub const UBUNTU_NATTY_11_04: Self = Self(1240);
    /// Ubuntu Oneiric 11.10 server.
    pub const UBUNTU_ONEIRIC_11_10: Self = Self(5579);
    /// Ubuntu Precise 12.04 server.
    pub const UBUNTU_PRECISE_12_04: Self = Self(8419);
    /// CentOS 5.8 server, 64 bit.
    pub const CENTOS_5_8_SERVER_64: Self = Self(54021);
    /// CentOS 6.2 server kernel, 64 bit.
    pub const CENTOS_6_2_SERVER_64_KERNEL: Self = Self(1356);
    /// CentOS 6.2 server ramdisk, 64 bit.
    pub const CENTOS_6_2_SERVER_64_RAMDISK: Self = Self(1357);
    /// CentOS 6.2 server, 64 bit.
    pub const CENTOS_6_2_SERVER_64: Self = Self(1358);
    /// Debian Squeeze 6.0.3 kernel.
    pub const DEBIAN_SQUEEZE_6_0_3_KERNEL: Self = Self(1359);
    /// Debian Squeeze 6.0.3 ramdisk.
    pub const DEBIAN_SQUEEZE_6_0_3_RAMDISK: Self = Self(1360);
    /// Debian Squeeze 6.0.3 server.
    pub const DEBIAN_SQUEEZE_6_0_3_SERVER: Self = Self(1361);
    /// Fedora 16 server, 64 bit.
    pub const FEDORA_16_SERVER_64: Self = Self(16291);
    /// BitNami Drupal 7.14.0.
    pub const BITNAMI_DRUPAL_7_14_0: Self = Self(22729);
    /// BitNami WebPack 1.2.0.
    pub const BITNAMI_WEBPACK_1_2_0: Self = Self(22731);
    /// BitNami DevPack 1.0.0.
    pub const BITNAMI_DEVPACK_1_0_0: Self = Self(4654);
    /// ActiveState Stackato 1.2.6.
    pub const ACTIVESTATE_STACKATO_1_2_6: Self = Self(14345);
    /// ActiveState Stackato 2.2.2.
    pub const ACTIVESTATE_STACKATO_2_2_2: Self = Self(59297);
    /// ActiveState Stackato 2.2.3.
    pub const ACTIVESTATE_STACKATO_2_2_3: Self = Self(60815);
    /// EnterpriseDB PPAS 9.1.2.
    pub const ENTERPRISEDB_PPAS_9_1_2: Self = Self(9953);
    /// EnterpriseDB PSQL 9.1.3.
    pub const ENTERPRISEDB_PSQL_9_1_3: Self = Self(9995);

    /// Wraps a raw image identifier.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Returns the raw identifier.
    #[must_use]
    pub const fn id(self) -> u32 {
        self.0
    }

    /// Reports whether no image was selected.
    #[must_use]
    pub const fn is_unset(self) -> bool {
        self.0 == 0
    }

    /// Returns the catalogue label for a known image.
    #[must_use]
    pub fn label(self) -> Option<&'static str> {
        KNOWN_IMAGES
            .iter()
            .find(|(_, image)| *image == self)
            .map(|(label, _)| *label)
    }
}

impl fmt::Display for ImageRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Public images published by the provider, keyed by label.
pub const KNOWN_IMAGES: &[(&str, ImageRef)] = &[
    ("ubuntu-lucid-10-04-kernel", ImageRef::UBUNTU_LUCID_10_04_KERNEL),
    ("ubuntu-lucid-10-04", ImageRef::UBUNTU_LUCID_10_04),
    ("ubuntu-maverick-10-10-kernel", ImageRef::UBUNTU_MAVERICK_10_10_KERNEL),
    ("ubuntu-maverick-10-10", ImageRef::UBUNTU_MAVERICK_10_10),
    ("ubuntu-natty-11-04-kernel", ImageRef::UBUNTU_NATTY_11_04_KERNEL),
    ("ubuntu-natty-11-04", ImageRef::UBUNTU_NATTY_11_04),
    ("ubuntu-oneiric-11-10", ImageRef::UBUNTU_ONEIRIC_11_10),
    ("ubuntu-precise-12-04", ImageRef::UBUNTU_PRECISE_12_04),
    ("centos-5-8-server-64", ImageRef::CENTOS_5_8_SERVER_64),
    ("centos-6-2-server-64-kernel", ImageRef::CENTOS_6_2_SERVER_64_KERNEL),
    ("centos-6-2-server-64-ramdisk", ImageRef::CENTOS_6_2_SERVER_64_RAMDISK),
    ("centos-6-2-server-64", ImageRef::CENTOS_6_2_SERVER_64),
    ("debian-squeeze-6-0-3-kernel", ImageRef::DEBIAN_SQUEEZE_6_0_3_KERNEL),
    ("debian-squeeze-6-0-3-ramdisk", ImageRef::DEBIAN_SQUEEZE_6_0_3_RAMDISK),
    ("debian-squeeze-6-0-3-server", ImageRef::DEBIAN_SQUEEZE_6_0_3_SERVER),
    ("fedora-16-server-64", ImageRef::FEDORA_16_SERVER_64),
    ("bitnami-drupal-7-14-0", ImageRef::BITNAMI_DRUPAL_7_14_0),
    ("bitnami-webpack-1-2-0", ImageRef::BITNAMI_WEBPACK_1_2_0),
    ("bitnami-devpack-1-0-0", ImageRef::BITNAMI_DEVPACK_1_0_0),
    ("activestate-stackato-1-2-6", ImageRef::ACTIVESTATE_STACKATO_1_2_6),
    ("activestate-stackato-2-2-2", ImageRef::ACTIVESTATE_STACKATO_2_2_2),
    ("activestate-stackato-2-2-3", ImageRef::ACTIVESTATE_STACKATO_2_2_3),
    ("enterprisedb-ppas-9-1-2", ImageRef::ENTERPRISEDB_PPAS_9_1_2),
    ("enterprisedb-psql-9-1-3", ImageRef::ENTERPRISEDB_PSQL_9_1_3),
];

/// Raised when an image selector is neither a known label nor a number.
#[derive(Clone, Debug, Error, Eq, PartialEq)]
#[error("unknown image '{0}': use a numeric image id or a known image label")]
pub struct UnknownImage(pub String);

impl FromStr for ImageRef {
    type Err = UnknownImage;

    /// Accepts a numeric identifier or a label from [`KNOWN_IMAGES`]
    /// (case-insensitive).
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        if let Ok(id) = trimmed.parse::<u32>() {
            return Ok(Self(id));
        }
        KNOWN_IMAGES
            .iter()
            .find(|(label, _)| label.eq_ignore_ascii_case(trimmed))
            .map(|(_, image)| *image)
            .ok_or_else(|| UnknownImage(value.to_owned()))
    }
}
