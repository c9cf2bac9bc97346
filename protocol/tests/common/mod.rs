//! Shared fixtures for the integration tests.

#![allow(dead_code)]

use tracing_subscriber::EnvFilter;

/// Routes `tracing` output through the test harness. Set `RUST_LOG=trace`
/// to see per-field decode and signing events.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// A 2-input with-anchor transaction, signed.
pub const BBC_TX: &str = "010000004aeaed5d00000000701af4705c5e6fcb04efc3ca3c851c1e4d8948e10923025f54bea9b00000000002799a49bcd8ca8723aa00aad86cec19d4d095191c20ce44000cfa7f6b09e9ed5d002b8336b3f242db6ecdc939c168f9613b14f0f4fd00418c3c9ba849c14aeaed5d0101f30b1fd894ba3eacf1b2309ce9fcb606892a70604af5791a732df423e47f001d9c64cd1d000000006400000000000000008164f1a77bd0e00f8023ffa2f7e0a76eb795414d9a57eb2f4ce5e9cc730c8103c501e1cbd24fa95312b81d2dc5ef6f60c39a9485819d4fa11bcfdde5f99151c8a4f981e14068ae196ce63ef403bc335ff439a00d1f00cc3e45cfc057354ea408cafad8e1fb769de3672a155545d490813e1c6eeefb7b4dec678e669c5de7e3c20b07";

/// A without-anchor transaction paying a template address, unsigned.
pub const MKF_TX: &str = "02000000a61a4e5f0000000001e6c1600226855e8aac1e3d60f76e7b326527e4a72620f0f77af2ae86901a4e5f0002030001e21d6d49931304681ac8ed683d8e90dc8eb6793a875d5361b0bb72bdf9601823000000000030750000000000000000";

/// Unsigned with-anchor transaction and its single-key signature.
pub const UNSIGNED_TX: &str = "010000005948d75d0000000069c07b268573a89eb2bf00a895d0ccd557b83af5490e15ca8d41dedc0000000002e563f10b18dc361305815da5b464ae6af0a39e5ef2dccf1a74e63b219781d65d00a43970696b5c1b39b0bf4bc0b68df5fb993213c367709a0b3cd9b42c8d31d65d000100815a6d40702a7da0a810de9ba76091cf0f7df0b7b56b7a6ef280c9ff26c14f40420f000000000064000000000000000000";
pub const SIGNED_TX: &str = "010000005948d75d0000000069c07b268573a89eb2bf00a895d0ccd557b83af5490e15ca8d41dedc0000000002e563f10b18dc361305815da5b464ae6af0a39e5ef2dccf1a74e63b219781d65d00a43970696b5c1b39b0bf4bc0b68df5fb993213c367709a0b3cd9b42c8d31d65d000100815a6d40702a7da0a810de9ba76091cf0f7df0b7b56b7a6ef280c9ff26c14f40420f0000000000640000000000000000400d6c650009275f9fa4f64cbd4712e995f84f00f96d056b4610d983c8d0cbad8aefcf75dbfa3f9afaf4bd27e9062f96a2fbc8a98a4feb796bfde547dcb9836b0c";
pub const PRIVATE_KEY: &str = "3a7a45f05643fa2e7eeb11da2e2c66e43ddf4f7535dccbb3e6c07fb39201b1df";

/// A signed transaction whose signature carries a template body.
pub const TEMPLATE_SIGNED_TX: &str = "010000008d31d65d0000000069c07b268573a89eb2bf00a895d0ccd557b83af5490e15ca8d41dedc000000000191b5093377f21fc5a76435351504ce5eae7591380cc3502672fb23c2f230d65d00016f757a33cf3b4f83f2b37b2308090f949c6f3870d50ceb3e5aa59b3118c66d7240420f0000000000640000000000000000816f757a33cf3b4f83f2b37b2308090f949c6f3870d50ceb3e5aa59b3118c66d720100815a6d40702a7da0a810de9ba76091cf0f7df0b7b56b7a6ef280c9ff26c14fa178a313c5800bebda19cff9e745a346725838c9b5ecb388797bc04a21bca4a9077dc2140b805b6816ab2a35e692821b7904dcd8bbd52f14c7e5c095b1f20308";

/// Seeds (display hex) of three multisig members, with their public keys.
pub const MEMBERS: [(&str, &str); 3] = [
    (
        "883864b0a1a1a16ecc926a602c38143940d6f7841f256f9fcf9a0709352104b9",
        "03308b75e326abeef560c5aab20b73e3125c2b0d9125fde0f5f0ad3609c47a02",
    ),
    (
        "2a28e059523bd977ef744fff93560cc4f5c305ada810e59e43c5430ee4369ee2",
        "b177f29366e694a1fac42f0cb308ebf8994a40bd859dc9f8d212018f8a2ea8fe",
    ),
    (
        "58354f02b7494af46d3ae6cb844535ec58034bc28fd7c4dda623a5a062c6e8e3",
        "715026cf7e8e4fcb182be3ad2b2cde793033500b671416f0f46e65b2e71fa585",
    ),
];
