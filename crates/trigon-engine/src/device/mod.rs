//! GPU device + surface management.
//!
//! The renderer never touches wgpu globals directly. It talks to a
//! [`Platform`] (API availability, adapter/device acquisition, canvas lookup)
//! and the [`RenderDevice`] it produces (surface configuration, shader and
//! pipeline creation, frame submission). The wgpu-backed implementation lives
//! in [`WgpuPlatform`] / [`WgpuDevice`].

mod desc;
mod frame;
mod gpu;
mod init;
mod platform;
mod surface;

pub use desc::{DrawCall, PassDesc, PipelineDesc};
pub use frame::WgpuFrame;
pub use gpu::{WgpuCanvas, WgpuDevice, WgpuPlatform};
pub use init::GpuInit;
pub use platform::{Platform, RenderDevice};
