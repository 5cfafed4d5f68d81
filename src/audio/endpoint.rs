//! Windows Core Audio master volume (`IAudioEndpointVolume`)
//!
//! Resolves the default render endpoint once at construction and keeps the
//! volume interface for the life of the sink.

use super::{AudioError, AudioSink};
use tracing::debug;
use windows::Win32::Foundation::RPC_E_CHANGED_MODE;
use windows::Win32::Media::Audio::Endpoints::IAudioEndpointVolume;
use windows::Win32::Media::Audio::{eConsole, eRender, IMMDeviceEnumerator, MMDeviceEnumerator};
use windows::Win32::System::Com::{
    CoCreateInstance, CoInitializeEx, CoUninitialize, CLSCTX_ALL, COINIT_APARTMENTTHREADED,
};

/// Balances a successful `CoInitializeEx` on drop
struct ComGuard {
    initialized: bool,
}

impl Drop for ComGuard {
    fn drop(&mut self) {
        if self.initialized {
            unsafe { CoUninitialize() };
        }
    }
}

/// Master volume of the default output device
pub struct EndpointVolumeSink {
    endpoint: IAudioEndpointVolume,
    // Declared last so the interface is released before COM is torn down.
    _com: ComGuard,
}

impl EndpointVolumeSink {
    pub fn open() -> Result<Self, AudioError> {
        let hr = unsafe { CoInitializeEx(None, COINIT_APARTMENTTHREADED) };
        // RPC_E_CHANGED_MODE: COM already initialized on this thread in another mode, usable as-is
        if hr.is_err() && hr != RPC_E_CHANGED_MODE {
            return Err(AudioError::Backend(format!(
                "COM initialization failed: {}",
                windows::core::Error::from(hr)
            )));
        }
        let com = ComGuard {
            initialized: hr.is_ok(),
        };

        let enumerator: IMMDeviceEnumerator =
            unsafe { CoCreateInstance(&MMDeviceEnumerator, None, CLSCTX_ALL) }
                .map_err(|e| AudioError::Backend(format!("device enumerator: {}", e)))?;

        let device = unsafe { enumerator.GetDefaultAudioEndpoint(eRender, eConsole) }
            .map_err(|e| AudioError::DeviceNotFound(e.to_string()))?;

        let endpoint: IAudioEndpointVolume = unsafe { device.Activate(CLSCTX_ALL, None) }
            .map_err(|e| AudioError::Backend(format!("endpoint volume activation: {}", e)))?;

        debug!("Default render endpoint volume interface acquired");

        Ok(Self {
            endpoint,
            _com: com,
        })
    }
}

impl AudioSink for EndpointVolumeSink {
    fn name(&self) -> &str {
        "windows-endpoint"
    }

    fn read_scalar(&self) -> Result<f32, AudioError> {
        unsafe { self.endpoint.GetMasterVolumeLevelScalar() }
            .map_err(|e| AudioError::Backend(e.to_string()))
    }

    fn write_scalar(&mut self, level: f32) -> Result<(), AudioError> {
        unsafe {
            self.endpoint
                .SetMasterVolumeLevelScalar(level, std::ptr::null())
        }
        .map_err(|e| AudioError::Backend(e.to_string()))
    }
}
