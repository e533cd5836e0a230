pub mod device_control;
