use ash::vk;
use wallcaster_gpu::{BootstrapConfig, DeviceContext, EnumerationLimits, GpuError};
use wallcaster_test::{Call, CallLog, FailAt, MockPhysicalDevice, MockWindow, RecordingGpu};

const G: vk::QueueFlags = vk::QueueFlags::GRAPHICS;
const C: vk::QueueFlags = vk::QueueFlags::COMPUTE;

fn gpu(devices: Vec<MockPhysicalDevice>) -> (RecordingGpu, CallLog) {
    let log = CallLog::default();
    (RecordingGpu::new(devices, log.clone()), log)
}

fn config() -> BootstrapConfig {
    BootstrapConfig::new("bootstrap-test").with_validation(false)
}

#[test]
fn picks_first_eligible_pair() {
    let (mut api, _log) = gpu(vec![
        MockPhysicalDevice::new("compute only", vec![(C, true)]),
        MockPhysicalDevice::new("no present", vec![(G, false)]),
        MockPhysicalDevice::new("second family", vec![(C, false), (G | C, true)])
            .with_kind(vk::PhysicalDeviceType::INTEGRATED_GPU),
        MockPhysicalDevice::graphics_present("discrete"),
    ]);
    let window = MockWindow { id: 1 };

    let ctx = DeviceContext::bootstrap(&mut api, &window, &config()).unwrap();

    // The integrated GPU comes first, so it wins over the discrete one.
    assert_eq!(ctx.physical_device(), 2);
    assert_eq!(ctx.queue_family_index(), 1);
    assert_eq!(ctx.queue(), 1);
    assert_eq!(ctx.device().family, 1);

    ctx.destroy(&mut api);
}

#[test]
fn creates_in_order_with_window_extensions() {
    let (mut api, log) = gpu(vec![MockPhysicalDevice::graphics_present("gpu")]);
    let ctx = DeviceContext::bootstrap(&mut api, &MockWindow { id: 1 }, &config()).unwrap();

    assert_eq!(
        log.calls(),
        vec![
            Call::CreateInstance,
            Call::CreateSurface,
            Call::CreateDevice {
                physical_device: 0,
                family: 0
            },
        ]
    );
    assert_eq!(api.last_extensions(), vec![ash::khr::surface::NAME]);

    ctx.destroy(&mut api);
}

#[test]
fn destroy_order_is_device_surface_instance() {
    let (mut api, log) = gpu(vec![MockPhysicalDevice::graphics_present("gpu")]);
    let ctx = DeviceContext::bootstrap(&mut api, &MockWindow { id: 1 }, &config()).unwrap();
    ctx.destroy(&mut api);

    assert_eq!(
        log.releases(),
        vec![Call::DestroyDevice, Call::DestroySurface, Call::DestroyInstance]
    );
    assert_eq!(log.live_resources(), 0);
}

#[test]
fn no_present_family_rolls_back() {
    let (mut api, log) = gpu(vec![
        MockPhysicalDevice::new("a", vec![(G, false), (C, true)]),
        MockPhysicalDevice::new("b", vec![(G, false)]),
    ]);

    let result = DeviceContext::bootstrap(&mut api, &MockWindow { id: 1 }, &config());
    assert!(matches!(result, Err(GpuError::NoSuitableDevice)));

    assert_eq!(
        log.calls(),
        vec![
            Call::CreateInstance,
            Call::CreateSurface,
            Call::DestroySurface,
            Call::DestroyInstance,
        ]
    );
    assert_eq!(log.live_resources(), 0);
}

#[test]
fn no_devices_rolls_back() {
    let (mut api, log) = gpu(Vec::new());

    let result = DeviceContext::bootstrap(&mut api, &MockWindow { id: 1 }, &config());
    assert!(matches!(result, Err(GpuError::NoSuitableDevice)));
    assert_eq!(log.live_resources(), 0);
}

#[test]
fn instance_failure_creates_nothing() {
    let (mut api, log) = gpu(vec![MockPhysicalDevice::graphics_present("gpu")]);
    api.fail_at(Some(FailAt::Instance));

    let result = DeviceContext::bootstrap(&mut api, &MockWindow { id: 1 }, &config());
    assert!(matches!(result, Err(GpuError::InstanceCreation(_))));
    assert!(log.calls().is_empty());
}

#[test]
fn extension_query_failure_is_instance_error() {
    let (mut api, log) = gpu(vec![MockPhysicalDevice::graphics_present("gpu")]);
    api.fail_at(Some(FailAt::Extensions));

    let result = DeviceContext::bootstrap(&mut api, &MockWindow { id: 1 }, &config());
    assert!(matches!(result, Err(GpuError::InstanceCreation(_))));
    assert!(log.calls().is_empty());
}

#[test]
fn surface_failure_destroys_instance() {
    let (mut api, log) = gpu(vec![MockPhysicalDevice::graphics_present("gpu")]);
    api.fail_at(Some(FailAt::Surface));

    let result = DeviceContext::bootstrap(&mut api, &MockWindow { id: 1 }, &config());
    assert!(matches!(result, Err(GpuError::SurfaceCreation(_))));
    assert_eq!(log.calls(), vec![Call::CreateInstance, Call::DestroyInstance]);
}

#[test]
fn enumeration_failure_rolls_back() {
    let (mut api, log) = gpu(vec![MockPhysicalDevice::graphics_present("gpu")]);
    api.fail_at(Some(FailAt::Enumerate));

    let result = DeviceContext::bootstrap(&mut api, &MockWindow { id: 1 }, &config());
    assert!(matches!(result, Err(GpuError::Vulkan(_))));
    assert_eq!(log.live_resources(), 0);
}

#[test]
fn failed_present_queries_surface_the_vulkan_error() {
    let (mut api, log) = gpu(vec![MockPhysicalDevice::graphics_present("gpu")]);
    api.fail_at(Some(FailAt::Present));

    let result = DeviceContext::bootstrap(&mut api, &MockWindow { id: 1 }, &config());
    assert!(matches!(
        result,
        Err(GpuError::Vulkan(vk::Result::ERROR_SURFACE_LOST_KHR))
    ));
    assert_eq!(
        log.releases(),
        vec![Call::DestroySurface, Call::DestroyInstance]
    );
    assert_eq!(log.live_resources(), 0);
}

#[test]
fn device_failure_destroys_surface_then_instance() {
    let (mut api, log) = gpu(vec![MockPhysicalDevice::graphics_present("gpu")]);
    api.fail_at(Some(FailAt::Device));

    let result = DeviceContext::bootstrap(&mut api, &MockWindow { id: 1 }, &config());
    assert!(matches!(result, Err(GpuError::DeviceCreation(_))));
    assert_eq!(
        log.releases(),
        vec![Call::DestroySurface, Call::DestroyInstance]
    );
    assert_eq!(log.live_resources(), 0);
}

#[test]
fn device_limit_hides_later_devices() {
    let (mut api, log) = gpu(vec![
        MockPhysicalDevice::new("a", vec![(C, true)]),
        MockPhysicalDevice::graphics_present("b"),
    ]);
    let config = config().with_limits(EnumerationLimits {
        max_physical_devices: 1,
        max_queue_families: 8,
    });

    let result = DeviceContext::bootstrap(&mut api, &MockWindow { id: 1 }, &config);
    assert!(matches!(result, Err(GpuError::NoSuitableDevice)));
    assert_eq!(log.live_resources(), 0);
}
