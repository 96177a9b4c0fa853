mod test_back_unbacked;
