// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Discriminator tables.
//!
//! Maps the `deviceType` / `remoteType` strings reported by the service to a
//! closed set of device families. Several model names share a family, e.g.
//! every hub model decodes as [`DeviceKind::Hub`]. Strings missing from the
//! tables have no kind and decode into the fallback variants.

/// Family of a physical device, selected by its `deviceType`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeviceKind {
    /// Hub, Hub Plus, Hub Mini, Hub 2, Hub 3.
    Hub,
    /// Bot.
    Bot,
    /// Curtain and Curtain 3.
    Curtain,
    /// Original plug.
    Plug,
    /// Plug Mini, all regions.
    PlugMini,
    /// Indoor thermo-hygrometers.
    Meter,
    /// Outdoor thermo-hygrometer.
    OutdoorMeter,
    /// Motion sensor.
    MotionSensor,
    /// Contact sensor.
    ContactSensor,
    /// Water leak detector.
    WaterLeakDetector,
    /// Smart locks.
    Lock,
    /// Keypad and Keypad Touch.
    Keypad,
    /// Color bulb.
    ColorBulb,
    /// LED strip light.
    StripLight,
    /// Ceiling lights.
    CeilingLight,
    /// S1 and K10 robot vacuums.
    RobotVacuum,
    /// S10 floor cleaning robot.
    RobotVacuumS10,
    /// Ultrasonic humidifier.
    Humidifier,
    /// Evaporative humidifier.
    EvaporativeHumidifier,
    /// Blind tilt.
    BlindTilt,
    /// Circulator fans.
    CirculatorFan,
    /// Roller shade.
    RollerShade,
    /// Relay switches.
    RelaySwitch,
    /// Air purifiers.
    AirPurifier,
    /// Cameras.
    Camera,
    /// Bluetooth remote.
    Remote,
}

impl DeviceKind {
    /// Every family, in declaration order.
    pub const ALL: [Self; 26] = [
        Self::Hub,
        Self::Bot,
        Self::Curtain,
        Self::Plug,
        Self::PlugMini,
        Self::Meter,
        Self::OutdoorMeter,
        Self::MotionSensor,
        Self::ContactSensor,
        Self::WaterLeakDetector,
        Self::Lock,
        Self::Keypad,
        Self::ColorBulb,
        Self::StripLight,
        Self::CeilingLight,
        Self::RobotVacuum,
        Self::RobotVacuumS10,
        Self::Humidifier,
        Self::EvaporativeHumidifier,
        Self::BlindTilt,
        Self::CirculatorFan,
        Self::RollerShade,
        Self::RelaySwitch,
        Self::AirPurifier,
        Self::Camera,
        Self::Remote,
    ];

    /// Looks up the family of a `deviceType` string.
    #[must_use]
    pub fn from_device_type(device_type: &str) -> Option<Self> {
        let kind = match device_type {
            "Hub" | "Hub Plus" | "Hub Mini" | "Hub 2" | "Hub 3" => Self::Hub,
            "Bot" => Self::Bot,
            "Curtain" | "Curtain3" => Self::Curtain,
            "Plug" => Self::Plug,
            "Plug Mini (US)" | "Plug Mini (JP)" | "Plug Mini (EU)" => Self::PlugMini,
            "Meter" | "MeterPlus" | "Meter Pro" | "Meter Pro(CO2)" => Self::Meter,
            "WoIOSensor" => Self::OutdoorMeter,
            "Motion Sensor" => Self::MotionSensor,
            "Contact Sensor" => Self::ContactSensor,
            "Water Detector" => Self::WaterLeakDetector,
            "Smart Lock" | "Smart Lock Pro" | "Smart Lock Lite" | "Smart Lock Ultra" => Self::Lock,
            "Keypad" | "Keypad Touch" => Self::Keypad,
            "Color Bulb" => Self::ColorBulb,
            "Strip Light" => Self::StripLight,
            "Ceiling Light" | "Ceiling Light Pro" => Self::CeilingLight,
            "Robot Vacuum Cleaner S1" | "Robot Vacuum Cleaner S1 Plus" | "K10+" | "K10+ Pro" => {
                Self::RobotVacuum
            }
            "Robot Vacuum Cleaner S10" => Self::RobotVacuumS10,
            "Humidifier" => Self::Humidifier,
            "Humidifier2" => Self::EvaporativeHumidifier,
            "Blind Tilt" => Self::BlindTilt,
            "Battery Circulator Fan" | "Circulator Fan" => Self::CirculatorFan,
            "Roller Shade" => Self::RollerShade,
            "Relay Switch 1PM" | "Relay Switch 1" => Self::RelaySwitch,
            "Air Purifier VOC"
            | "Air Purifier PM2.5"
            | "Air Purifier Table VOC"
            | "Air Purifier Table PM2.5" => Self::AirPurifier,
            "Indoor Cam" | "Pan/Tilt Cam" | "Pan/Tilt Cam 2K" => Self::Camera,
            "Remote" => Self::Remote,
            _ => return None,
        };
        Some(kind)
    }

    /// Returns every `deviceType` string of this family.
    #[must_use]
    pub const fn device_types(self) -> &'static [&'static str] {
        match self {
            Self::Hub => &["Hub", "Hub Plus", "Hub Mini", "Hub 2", "Hub 3"],
            Self::Bot => &["Bot"],
            Self::Curtain => &["Curtain", "Curtain3"],
            Self::Plug => &["Plug"],
            Self::PlugMini => &["Plug Mini (US)", "Plug Mini (JP)", "Plug Mini (EU)"],
            Self::Meter => &["Meter", "MeterPlus", "Meter Pro", "Meter Pro(CO2)"],
            Self::OutdoorMeter => &["WoIOSensor"],
            Self::MotionSensor => &["Motion Sensor"],
            Self::ContactSensor => &["Contact Sensor"],
            Self::WaterLeakDetector => &["Water Detector"],
            Self::Lock => &[
                "Smart Lock",
                "Smart Lock Pro",
                "Smart Lock Lite",
                "Smart Lock Ultra",
            ],
            Self::Keypad => &["Keypad", "Keypad Touch"],
            Self::ColorBulb => &["Color Bulb"],
            Self::StripLight => &["Strip Light"],
            Self::CeilingLight => &["Ceiling Light", "Ceiling Light Pro"],
            Self::RobotVacuum => &[
                "Robot Vacuum Cleaner S1",
                "Robot Vacuum Cleaner S1 Plus",
                "K10+",
                "K10+ Pro",
            ],
            Self::RobotVacuumS10 => &["Robot Vacuum Cleaner S10"],
            Self::Humidifier => &["Humidifier"],
            Self::EvaporativeHumidifier => &["Humidifier2"],
            Self::BlindTilt => &["Blind Tilt"],
            Self::CirculatorFan => &["Battery Circulator Fan", "Circulator Fan"],
            Self::RollerShade => &["Roller Shade"],
            Self::RelaySwitch => &["Relay Switch 1PM", "Relay Switch 1"],
            Self::AirPurifier => &[
                "Air Purifier VOC",
                "Air Purifier PM2.5",
                "Air Purifier Table VOC",
                "Air Purifier Table PM2.5",
            ],
            Self::Camera => &["Indoor Cam", "Pan/Tilt Cam", "Pan/Tilt Cam 2K"],
            Self::Remote => &["Remote"],
        }
    }
}

/// Family of an infrared remote, selected by its `remoteType`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RemoteKind {
    /// Air conditioner.
    AirConditioner,
    /// TV, IPTV / streamer and set top box.
    Tv,
    /// DVD player and speaker.
    MediaPlayer,
    /// Fan.
    Fan,
    /// Light.
    Light,
    /// Projector.
    Projector,
    /// Camera.
    Camera,
    /// Air purifier.
    AirPurifier,
    /// Water heater.
    WaterHeater,
    /// Vacuum cleaner.
    VacuumCleaner,
    /// Appliances learned without a template.
    Others,
    /// Learned ("DIY") copy of any template, customize buttons only.
    Diy,
}

impl RemoteKind {
    /// Every family, in declaration order.
    pub const ALL: [Self; 12] = [
        Self::AirConditioner,
        Self::Tv,
        Self::MediaPlayer,
        Self::Fan,
        Self::Light,
        Self::Projector,
        Self::Camera,
        Self::AirPurifier,
        Self::WaterHeater,
        Self::VacuumCleaner,
        Self::Others,
        Self::Diy,
    ];

    /// Prefix of learned remote types, e.g. `DIY TV`.
    pub const DIY_PREFIX: &'static str = "DIY ";

    /// Looks up the family of a `remoteType` string.
    #[must_use]
    pub fn from_remote_type(remote_type: &str) -> Option<Self> {
        let kind = match remote_type {
            "Air Conditioner" => Self::AirConditioner,
            "TV" | "IPTV" | "Streamer" | "Set Top Box" => Self::Tv,
            "DVD" | "Speaker" => Self::MediaPlayer,
            "Fan" => Self::Fan,
            "Light" => Self::Light,
            "Projector" => Self::Projector,
            "Camera" => Self::Camera,
            "Air Purifier" => Self::AirPurifier,
            "Water Heater" => Self::WaterHeater,
            "Vacuum Cleaner" => Self::VacuumCleaner,
            "Others" => Self::Others,
            diy if diy.starts_with(Self::DIY_PREFIX) => Self::Diy,
            _ => return None,
        };
        Some(kind)
    }

    /// Returns the `remoteType` strings of this family.
    ///
    /// [`RemoteKind::Diy`] matches by prefix and lists one sample.
    #[must_use]
    pub const fn remote_types(self) -> &'static [&'static str] {
        match self {
            Self::AirConditioner => &["Air Conditioner"],
            Self::Tv => &["TV", "IPTV", "Streamer", "Set Top Box"],
            Self::MediaPlayer => &["DVD", "Speaker"],
            Self::Fan => &["Fan"],
            Self::Light => &["Light"],
            Self::Projector => &["Projector"],
            Self::Camera => &["Camera"],
            Self::AirPurifier => &["Air Purifier"],
            Self::WaterHeater => &["Water Heater"],
            Self::VacuumCleaner => &["Vacuum Cleaner"],
            Self::Others => &["Others"],
            Self::Diy => &["DIY TV"],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_device_type_maps_back_to_its_kind() {
        for kind in DeviceKind::ALL {
            for device_type in kind.device_types() {
                assert_eq!(DeviceKind::from_device_type(device_type), Some(kind));
            }
        }
    }

    #[test]
    fn hub_models_share_a_kind() {
        for model in ["Hub", "Hub Plus", "Hub Mini", "Hub 2", "Hub 3"] {
            assert_eq!(DeviceKind::from_device_type(model), Some(DeviceKind::Hub));
        }
    }

    #[test]
    fn unknown_device_type_has_no_kind() {
        assert_eq!(DeviceKind::from_device_type("Teleporter"), None);
        assert_eq!(DeviceKind::from_device_type("hub 2"), None);
    }

    #[test]
    fn every_remote_type_maps_back_to_its_kind() {
        for kind in RemoteKind::ALL {
            for remote_type in kind.remote_types() {
                assert_eq!(RemoteKind::from_remote_type(remote_type), Some(kind));
            }
        }
    }

    #[test]
    fn diy_remotes_match_by_prefix() {
        assert_eq!(RemoteKind::from_remote_type("DIY Fan"), Some(RemoteKind::Diy));
        assert_eq!(RemoteKind::from_remote_type("DIY"), None);
    }
}
