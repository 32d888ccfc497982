/// Reset the MCU, restarting the firmware from scratch.
///
/// Does nothing on the host.
pub fn reboot_keyboard() {
    warn!("Rebooting macropad!");
    // For cortex-m:
    #[cfg(all(
        target_arch = "arm",
        target_os = "none",
        any(target_abi = "eabi", target_abi = "eabihf")
    ))]
    cortex_m::peripheral::SCB::sys_reset();
}
